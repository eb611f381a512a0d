//! HTTP endpoint handlers for the roster API.
//!
//! Handlers validate the request shape, then delegate to the
//! [`AttendanceEngine`](muster_engine::AttendanceEngine). Every
//! mutation responds with freshly composed views so clients can
//! re-render entirely from the response.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Roster HTML page |
//! | `GET` | `/api/students` | List all students with histories |
//! | `POST` | `/api/students` | Register a student |
//! | `PATCH` | `/api/students/:id` | Transition one student |
//! | `POST` | `/api/students/bulk` | Transition every student |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use muster_types::{AttendanceStatus, StudentId, StudentView};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

const MISSING_REQUIRED_FIELDS: &str = "Missing required fields.";
const MISSING_STATUS_OR_NOTE: &str = "Missing status or note.";
const MISSING_STATUS: &str = "Missing status.";

// ---------------------------------------------------------------------------
// Request body structs
// ---------------------------------------------------------------------------

/// Request body for `POST /api/students`.
///
/// Fields are optional at the serde level so an absent field produces
/// a clean 400 with the roster's own message instead of a rejection
/// from the deserializer.
#[derive(Debug, serde::Deserialize)]
pub struct CreateStudent {
    /// Caller-assigned student id (UUID string).
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Grouping label.
    pub category: Option<String>,
}

/// Request body for `PATCH /api/students/{id}`.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateStudent {
    /// New status token.
    pub status: Option<String>,
    /// Context note stored with the history record.
    pub note: Option<String>,
}

/// Request body for `POST /api/students/bulk`.
#[derive(Debug, serde::Deserialize)]
pub struct BulkUpdate {
    /// New status token applied to every student.
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /api/students -- list all students
// ---------------------------------------------------------------------------

/// Return every student with their full history, newest registration
/// first, as a bare JSON array.
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudentView>>, ApiError> {
    let views = state.engine.roster().await?;
    Ok(Json(views))
}

// ---------------------------------------------------------------------------
// POST /api/students -- register a student
// ---------------------------------------------------------------------------

/// Register a new student and respond `201 Created` with their view.
///
/// Requires `id`, `name`, and `category`; responds 400 with
/// `"Missing required fields."` when any is absent or blank.
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateStudent>,
) -> Result<(StatusCode, Json<StudentView>), ApiError> {
    let id = require(body.id.as_deref(), MISSING_REQUIRED_FIELDS)?;
    let name = require(body.name.as_deref(), MISSING_REQUIRED_FIELDS)?;
    let category = require(body.category.as_deref(), MISSING_REQUIRED_FIELDS)?;
    let id = parse_student_id(id)?;

    let view = state.engine.register(id, name, category).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

// ---------------------------------------------------------------------------
// PATCH /api/students/:id -- transition one student
// ---------------------------------------------------------------------------

/// Move one student to a new status and respond with their updated view.
///
/// Requires `status` and `note` in the body; responds 400 with
/// `"Missing status or note."` when either is absent or blank, and 404
/// with `"Student not found."` for an unknown id.
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStudent>,
) -> Result<Json<StudentView>, ApiError> {
    let status = require(body.status.as_deref(), MISSING_STATUS_OR_NOTE)?;
    let note = require(body.note.as_deref(), MISSING_STATUS_OR_NOTE)?;
    let id = parse_student_id(&id)?;
    let status: AttendanceStatus = status.parse()?;

    let view = state.engine.transition(id, status, note).await?;
    Ok(Json(view))
}

// ---------------------------------------------------------------------------
// POST /api/students/bulk -- transition every student
// ---------------------------------------------------------------------------

/// Move every student to the given status and respond with the whole
/// roster, newest registration first, as a bare JSON array.
///
/// Requires `status`; responds 400 with `"Missing status."` when it is
/// absent or blank.
pub async fn bulk_update(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BulkUpdate>,
) -> Result<Json<Vec<StudentView>>, ApiError> {
    let status = require(body.status.as_deref(), MISSING_STATUS)?;
    let status: AttendanceStatus = status.parse()?;

    let views = state.engine.bulk_transition(status).await?;
    Ok(Json(views))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim a field and reject it with `message` when absent or empty.
fn require<'a>(field: Option<&'a str>, message: &'static str) -> Result<&'a str, ApiError> {
    match field.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::MissingField(message)),
    }
}

/// Parse a student id from its path or body string form.
fn parse_student_id(s: &str) -> Result<StudentId, ApiError> {
    s.parse::<Uuid>()
        .map(StudentId::from)
        .map_err(|e| ApiError::InvalidId(format!("{s}: {e}")))
}

// ---------------------------------------------------------------------------
// GET / -- roster page
// ---------------------------------------------------------------------------

/// Serve the roster page.
///
/// The page is fully static; it loads and mutates data exclusively
/// through the JSON API and re-renders the whole table from each
/// response. Failures surface in a visible banner rather than only in
/// the console.
#[allow(clippy::unused_async)] // Axum handlers must be async even when static.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Muster</title>
    <style>
        body {
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 960px;
            margin: 0 auto;
        }
        h1 { color: #58a6ff; margin-bottom: 0.25rem; }
        .subtitle { color: #8b949e; margin-top: 0; }
        #error {
            display: none;
            background: #2d1517;
            border: 1px solid #f85149;
            color: #f85149;
            border-radius: 6px;
            padding: 0.5rem 1rem;
            margin: 1rem 0;
        }
        form, .bulk { margin: 1rem 0; }
        .bulk span { color: #8b949e; margin-right: 0.5rem; }
        input, select, button {
            background: #161b22;
            color: #c9d1d9;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 0.4rem 0.6rem;
            font: inherit;
        }
        button:hover { border-color: #58a6ff; cursor: pointer; }
        table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
        th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #30363d; vertical-align: top; }
        th { color: #8b949e; font-weight: normal; }
        .status-present { color: #3fb950; }
        .status-late { color: #d29922; }
        .status-unexcused { color: #f85149; }
        .status-excused { color: #58a6ff; }
        summary { color: #8b949e; cursor: pointer; }
        .record { padding: 0.2rem 0 0.2rem 1rem; color: #8b949e; }
        .empty { color: #8b949e; }
    </style>
</head>
<body>
    <h1>Muster</h1>
    <p class="subtitle">Roster attendance tracker</p>

    <div id="error"></div>

    <form id="add-form">
        <input id="name" placeholder="Name" autocomplete="off">
        <input id="category" placeholder="Category" autocomplete="off">
        <button type="submit">Add student</button>
    </form>

    <div class="bulk">
        <span>Mark all:</span>
        <button type="button" data-bulk="present">present</button>
        <button type="button" data-bulk="late">late</button>
        <button type="button" data-bulk="unexcused">unexcused</button>
        <button type="button" data-bulk="excused">excused</button>
    </div>

    <table>
        <thead>
            <tr><th>Name</th><th>Category</th><th>Status</th><th>Last updated</th><th>History</th></tr>
        </thead>
        <tbody id="roster"></tbody>
    </table>

    <script>
        const STATUSES = ["present", "late", "unexcused", "excused"];
        const errorBox = document.getElementById("error");

        function showError(message) {
            errorBox.textContent = message;
            errorBox.style.display = "block";
        }

        function clearError() {
            errorBox.style.display = "none";
        }

        async function call(path, options) {
            const response = await fetch(path, options);
            const body = await response.json();
            if (!response.ok) {
                throw new Error(body.error || "Request failed.");
            }
            return body;
        }

        function cell(row, text) {
            const td = document.createElement("td");
            td.textContent = text;
            row.appendChild(td);
            return td;
        }

        function render(students) {
            const tbody = document.getElementById("roster");
            tbody.innerHTML = "";
            if (!students.length) {
                const row = document.createElement("tr");
                const td = cell(row, "No students yet. Use the form above to get started.");
                td.className = "empty";
                td.colSpan = 5;
                tbody.appendChild(row);
                return;
            }

            for (const student of students) {
                const row = document.createElement("tr");
                cell(row, student.name);
                cell(row, student.category);

                const statusCell = document.createElement("td");
                const select = document.createElement("select");
                for (const status of STATUSES) {
                    const option = document.createElement("option");
                    option.value = status;
                    option.textContent = status;
                    option.selected = student.status === status;
                    select.appendChild(option);
                }
                select.className = "status-" + student.status;
                select.addEventListener("change", () =>
                    mutate("/api/students/" + student.id, {
                        method: "PATCH",
                        headers: { "Content-Type": "application/json" },
                        body: JSON.stringify({ status: select.value, note: "Status updated" }),
                    })
                );
                statusCell.appendChild(select);
                row.appendChild(statusCell);

                cell(row, student.lastUpdated
                    ? new Date(student.lastUpdated).toLocaleString()
                    : "--");

                const historyCell = document.createElement("td");
                const details = document.createElement("details");
                const summary = document.createElement("summary");
                summary.textContent = student.records.length + " records";
                details.appendChild(summary);
                for (const record of student.records) {
                    const div = document.createElement("div");
                    div.className = "record";
                    div.textContent = new Date(record.timestamp).toLocaleString()
                        + " [" + record.status + "] " + record.note;
                    details.appendChild(div);
                }
                historyCell.appendChild(details);
                row.appendChild(historyCell);

                tbody.appendChild(row);
            }
        }

        async function reload() {
            render(await call("/api/students"));
        }

        async function mutate(path, options) {
            clearError();
            try {
                await call(path, options);
                await reload();
                return true;
            } catch (error) {
                showError(error.message);
                return false;
            }
        }

        document.getElementById("add-form").addEventListener("submit", async (event) => {
            event.preventDefault();
            const name = document.getElementById("name").value.trim();
            const category = document.getElementById("category").value.trim();
            if (!name || !category) {
                showError("Missing required fields.");
                return;
            }
            const ok = await mutate("/api/students", {
                method: "POST",
                headers: { "Content-Type": "application/json" },
                body: JSON.stringify({ id: crypto.randomUUID(), name, category }),
            });
            if (ok) {
                event.target.reset();
                document.getElementById("name").focus();
            }
        });

        for (const button of document.querySelectorAll("[data-bulk]")) {
            button.addEventListener("click", () =>
                mutate("/api/students/bulk", {
                    method: "POST",
                    headers: { "Content-Type": "application/json" },
                    body: JSON.stringify({ status: button.dataset.bulk }),
                })
            );
        }

        reload().catch((error) => showError(error.message));
    </script>
</body>
</html>"##;
