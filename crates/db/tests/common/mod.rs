//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use chatflow_core::actions::{ActionPayload, ImageMessage, TextMessage};
use chatflow_core::sequencing::SequenceAssignment;
use chatflow_core::types::DbId;
use chatflow_db::models::button::CreateButton;
use chatflow_db::models::group::{CreateGroup, Group};
use chatflow_db::models::project::CreateProject;
use chatflow_db::repositories::{GroupRepo, ProjectRepo};
use sqlx::PgPool;

/// Create a project with a single group and return the group.
pub async fn seed_group(pool: &PgPool) -> Group {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "Support bot".to_string(),
        },
    )
    .await
    .unwrap();
    add_group(pool, project.id, "Greeting").await
}

/// Create another group in an existing project.
pub async fn add_group(pool: &PgPool, project_id: DbId, name: &str) -> Group {
    GroupRepo::create(
        pool,
        project_id,
        &CreateGroup {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

pub fn text(body: &str) -> ActionPayload {
    ActionPayload::TextMessage(TextMessage {
        text: body.to_string(),
    })
}

pub fn image(path: &str) -> ActionPayload {
    ActionPayload::ImageMessage(ImageMessage {
        image_path: path.to_string(),
    })
}

pub fn button(label: &str) -> CreateButton {
    CreateButton {
        text: label.to_string(),
        payload: format!("{label}-payload"),
    }
}

pub fn assign(id: DbId, sequence_number: i32) -> SequenceAssignment {
    SequenceAssignment {
        id,
        sequence_number,
    }
}
