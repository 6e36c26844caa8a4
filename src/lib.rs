pub mod comic;
pub mod configuration;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod run;
pub mod store;
pub mod supabase_client;
pub mod views;

pub use configuration::Settings;
pub use models::{Cli, Command};
pub use run::{run, Site};
