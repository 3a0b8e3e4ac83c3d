use super::*;

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
  let available_width = area.width.saturating_sub(2).max(1);
  let available_height = area.height.saturating_sub(2).max(1);

  let width = available_width.clamp(1, width.max(1)).min(area.width);
  let height = available_height.clamp(1, height.max(1)).min(area.height);

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;

  Rect::new(x, y, width, height)
}

pub(crate) fn mask(text: &str) -> String {
  "*".repeat(text.chars().count())
}

pub(crate) fn saturating_usize_to_u16(value: usize) -> u16 {
  u16::try_from(value).unwrap_or(u16::MAX)
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}
