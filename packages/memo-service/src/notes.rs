use uuid::Uuid;

use crate::{MemoService, NoteResponse, Result, create_note};

impl MemoService {
	pub async fn get_note(&self, note_id: Uuid) -> Result<NoteResponse> {
		let note = self.store.fetch_note(note_id).await?;

		Ok(create_note::note_response(note))
	}

	/// Deletes a note together with every task attached to it.
	pub async fn delete_note(&self, note_id: Uuid) -> Result<()> {
		self.store.delete_note(note_id).await?;

		tracing::info!(note_id = %note_id, "Deleted note.");

		Ok(())
	}
}
