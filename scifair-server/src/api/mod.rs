//! HTTP API handlers for scifair-server

pub mod accounts;
pub mod analysis;
pub mod auth;
pub mod extract;
pub mod files;
pub mod guide;
pub mod health;
pub mod journal;
pub mod projects;

pub use accounts::{sign_in, sign_out, sign_up};
pub use analysis::{analyze_data, analyze_project, plan_experiment, research_question};
pub use auth::{auth_middleware, client_key_middleware, CurrentUser};
pub use files::{list_files, upload_file};
pub use guide::{export_project, get_guide, get_presentation, get_slides};
pub use health::health_routes;
pub use journal::{add_data_point, add_note, add_result, delete_note, delete_result, list_data_points};
pub use projects::{
    advance_status, delete_project, generate_project, get_project, get_project_detail,
    list_projects,
};
