pub mod a2s;
pub mod helpers;
pub mod models;
