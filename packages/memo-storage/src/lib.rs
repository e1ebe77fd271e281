pub mod memory;
pub mod models;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin};

use uuid::Uuid;

use models::{Note, Task, TaskStatus};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence seam for notes and their tasks. Implementations own the data;
/// callers only ever receive snapshots.
pub trait NoteStore
where
	Self: Send + Sync,
{
	fn insert_note<'a>(&'a self, note: &'a Note) -> BoxFuture<'a, Result<()>>;
	fn fetch_note<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<Note>>;
	fn fetch_all_notes<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Note>>>;
	fn delete_note<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<()>>;
	fn fetch_task<'a>(&'a self, task_id: Uuid) -> BoxFuture<'a, Result<Task>>;
	fn set_task_status<'a>(
		&'a self,
		task_id: Uuid,
		status: TaskStatus,
	) -> BoxFuture<'a, Result<Task>>;
}
