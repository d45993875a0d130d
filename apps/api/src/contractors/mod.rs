// Contractor directory: listing with server-computed risk scores.

pub mod directory;
pub mod handlers;
pub mod models;
