use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
	BoxFuture, Error, NoteStore, Result,
	models::{Note, Task, TaskStatus},
};

/// Reference store backed by a process-local map. Reads take the lock shared,
/// so concurrent searches never wait on each other.
#[derive(Default)]
pub struct MemoryStore {
	inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
	notes: HashMap<Uuid, Note>,
	// task id -> owning note id
	tasks: HashMap<Uuid, Uuid>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

fn unknown_note() -> Error {
	Error::NotFound("Unknown note id.".to_string())
}

fn unknown_task() -> Error {
	Error::NotFound("Unknown task id.".to_string())
}

impl Inner {
	fn task(&self, task_id: Uuid) -> Result<&Task> {
		let note_id = self.tasks.get(&task_id).ok_or_else(unknown_task)?;
		let note = self.notes.get(note_id).ok_or_else(unknown_task)?;

		note.tasks.iter().find(|task| task.id == task_id).ok_or_else(unknown_task)
	}

	fn task_mut(&mut self, task_id: Uuid) -> Result<&mut Task> {
		let note_id = *self.tasks.get(&task_id).ok_or_else(unknown_task)?;
		let note = self.notes.get_mut(&note_id).ok_or_else(unknown_task)?;

		note.tasks.iter_mut().find(|task| task.id == task_id).ok_or_else(unknown_task)
	}
}

impl NoteStore for MemoryStore {
	fn insert_note<'a>(&'a self, note: &'a Note) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.write().await;

			for task in &note.tasks {
				inner.tasks.insert(task.id, note.id);
			}

			inner.notes.insert(note.id, note.clone());

			Ok(())
		})
	}

	fn fetch_note<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let inner = self.inner.read().await;

			inner.notes.get(&id).cloned().ok_or_else(unknown_note)
		})
	}

	fn fetch_all_notes<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(async move {
			let inner = self.inner.read().await;

			Ok(inner.notes.values().cloned().collect())
		})
	}

	fn delete_note<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.write().await;
			let note = inner.notes.remove(&id).ok_or_else(unknown_note)?;

			for task in &note.tasks {
				inner.tasks.remove(&task.id);
			}

			Ok(())
		})
	}

	fn fetch_task<'a>(&'a self, task_id: Uuid) -> BoxFuture<'a, Result<Task>> {
		Box::pin(async move {
			let inner = self.inner.read().await;

			inner.task(task_id).cloned()
		})
	}

	fn set_task_status<'a>(
		&'a self,
		task_id: Uuid,
		status: TaskStatus,
	) -> BoxFuture<'a, Result<Task>> {
		Box::pin(async move {
			let mut inner = self.inner.write().await;
			let task = inner.task_mut(task_id)?;

			task.status = status;

			Ok(task.clone())
		})
	}
}
