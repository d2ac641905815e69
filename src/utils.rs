use super::*;

pub(crate) fn format_comments(count: u64) -> String {
  match count {
    1 => "1 comment".to_string(),
    _ => format!("{count} comments"),
  }
}

pub(crate) fn format_date(timestamp: u64) -> String {
  i64::try_from(timestamp)
    .ok()
    .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    .map_or_else(
      || "unknown".to_string(),
      |date| date.format("%-d %B %Y").to_string(),
    )
}

pub(crate) fn format_points(score: u64) -> String {
  match score {
    1 => "1 point".to_string(),
    _ => format!("{score} points"),
  }
}

pub(crate) fn html_to_text(html: &str) -> String {
  html2text::from_read(html.as_bytes(), usize::MAX)
    .ok()
    .map(|text| text.trim().to_owned())
    .unwrap_or_default()
}

pub(crate) fn relative_time(timestamp: u64, now: DateTime<Utc>) -> String {
  let Some(then) = i64::try_from(timestamp)
    .ok()
    .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
  else {
    return "unknown".to_string();
  };

  let seconds = now.signed_duration_since(then).num_seconds();

  match seconds {
    i64::MIN..60 => "just now".to_string(),
    60..3600 => format!("{}m ago", seconds / 60),
    3600..86400 => format!("{}h ago", seconds / 3600),
    86400..2_592_000 => format!("{}d ago", seconds / 86400),
    _ => format_date(timestamp),
  }
}

pub(crate) fn strip_tags(text: &str) -> String {
  let mut cleaned = String::with_capacity(text.len());
  let mut inside_tag = false;
  let mut last_was_space = false;

  for ch in text.chars() {
    match ch {
      '<' => {
        inside_tag = true;

        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      '>' => {
        inside_tag = false;
      }
      _ if inside_tag => {}
      _ if ch.is_whitespace() => {
        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      _ => {
        cleaned.push(ch);
        last_was_space = false;
      }
    }
  }

  let decoded = html_escape::decode_html_entities(cleaned.trim());

  decoded.split_whitespace().collect::<Vec<_>>().join(" ")
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

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
