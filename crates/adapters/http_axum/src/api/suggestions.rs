//! JSON handler for the curated task suggestions.

use axum::Json;

/// Curated starter tasks shown by clients as quick suggestions.
const SUGGESTIONS: [&str; 12] = [
    "Open Notepad and create a new document",
    "Check system performance and memory usage",
    "Create a new folder on Desktop",
    "Launch Chrome and search for cybersecurity",
    "Clean temporary files and optimize system",
    "Take a screenshot and save to Documents",
    "Open Task Manager to check processes",
    "Create a backup of important files",
    "Update Windows system settings",
    "Install software from Microsoft Store",
    "Configure firewall settings",
    "Run disk cleanup utility",
];

/// `GET /api/suggestions`: static list of starter tasks.
pub async fn list() -> Json<Vec<&'static str>> {
    Json(SUGGESTIONS.to_vec())
}
