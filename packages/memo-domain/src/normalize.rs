use memo_config::NoteRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
	EmptyTitle,
	EmptyBody,
	TitleTooLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
	pub title: String,
	pub body: String,
}

pub fn normalize_note(
	title: &str,
	body: &str,
	rules: &NoteRules,
) -> Result<NoteDraft, RejectReason> {
	let title = title.trim();
	let body = body.trim();

	if title.is_empty() {
		return Err(RejectReason::EmptyTitle);
	}
	if body.is_empty() {
		return Err(RejectReason::EmptyBody);
	}
	if title.chars().count() > rules.max_title_chars {
		return Err(RejectReason::TitleTooLong);
	}

	Ok(NoteDraft {
		title: title.to_string(),
		body: truncate_chars(body, rules.max_body_chars),
	})
}

// Counts characters, not bytes, and never splits a character.
fn truncate_chars(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((boundary, _)) => text[..boundary].to_string(),
		None => text.to_string(),
	}
}
