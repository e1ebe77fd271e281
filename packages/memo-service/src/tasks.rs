use uuid::Uuid;

use memo_storage::models::TaskStatus;

use crate::{MemoService, Result, TaskResponse, create_note};

impl MemoService {
	pub async fn get_task(&self, task_id: Uuid) -> Result<TaskResponse> {
		let task = self.store.fetch_task(task_id).await?;

		Ok(create_note::task_response(task))
	}

	/// Sets a task to the given status. Re-applying the current status is a
	/// no-op that still returns the task.
	pub async fn update_task_status(
		&self,
		task_id: Uuid,
		status: TaskStatus,
	) -> Result<TaskResponse> {
		let task = self.store.set_task_status(task_id, status).await?;

		tracing::info!(task_id = %task.id, status = task.status.as_str(), "Updated task status.");

		Ok(create_note::task_response(task))
	}
}
