use std::str::FromStr;

use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Note {
	pub id: Uuid,
	pub title: String,
	pub body: String,
	pub summary: String,
	pub tags: Vec<String>,
	pub embedding: Vec<f32>,
	pub created_at: OffsetDateTime,
	pub tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct Task {
	pub id: Uuid,
	pub note_id: Uuid,
	pub text: String,
	pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
	Open,
	Done,
}

impl TaskStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Open => "open",
			Self::Done => "done",
		}
	}
}

impl FromStr for TaskStatus {
	type Err = crate::Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"open" => Ok(Self::Open),
			"done" => Ok(Self::Done),
			other => Err(crate::Error::InvalidArgument(format!("Unknown task status {other:?}."))),
		}
	}
}
