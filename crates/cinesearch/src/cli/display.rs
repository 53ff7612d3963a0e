//! Display formatting utilities for CLI output

use colored::*;

use crate::record::SearchHit;

const WRAP_WIDTH: usize = 80;

/// Wrap text to fit within `width` characters
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      lines.push(String::new());
      continue;
    }

    let mut current_line = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
      let word_width = word.chars().count();
      if current_line.is_empty() {
        current_line = word.to_string();
        current_width = word_width;
      } else if current_width + 1 + word_width <= width {
        current_line.push(' ');
        current_line.push_str(word);
        current_width += 1 + word_width;
      } else {
        lines.push(std::mem::take(&mut current_line));
        current_line = word.to_string();
        current_width = word_width;
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}

/// One-line summary of a hit: title, year, genres
pub fn hit_headline(hit: &SearchHit) -> String {
  let record = &hit.record;
  let mut headline = format!("{} ({})", record.title, record.year);
  if !record.genres.is_empty() {
    headline.push_str(&format!(" [{}]", record.genres.join(", ")));
  }
  headline
}

/// Display a ranked search hit with its wrapped description
pub fn display_search_hit(rank: usize, hit: &SearchHit) {
  let record = &hit.record;
  println!(
    "{} {} ({}) {}",
    format!("{rank:>2}.").dimmed(),
    record.title.yellow().bold(),
    record.year.to_string().cyan(),
    format!("score {:.3}", hit.relevance_score).dimmed()
  );

  if !record.genres.is_empty() {
    println!("    {}", record.genres.join(", ").blue());
  }

  let description =
    if record.description.is_empty() { &record.short_description } else { &record.description };
  for line in wrap_text(description, WRAP_WIDTH - 4) {
    println!("    {line}");
  }
  println!();
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::Record;

  #[test]
  fn test_wrap_text_counts_characters() {
    let lines = wrap_text("Хакер Нео узнаёт правду о матрице", 12);
    assert_eq!(lines, vec!["Хакер Нео", "узнаёт", "правду о", "матрице"]);
  }

  #[test]
  fn test_wrap_text_keeps_blank_paragraphs() {
    let lines = wrap_text("one\n\ntwo", 80);
    assert_eq!(lines, vec!["one", "", "two"]);
  }

  #[test]
  fn test_hit_headline() {
    let hit = SearchHit::new(Record::new(1, "Heat").with_year(1995).with_genres(["crime"]), 0.7);
    assert_eq!(hit_headline(&hit), "Heat (1995) [crime]");
  }
}
