use super::{heading, long_date, render_state, rule, short_date};
use crate::models::{Letter, ViewState};

pub fn render_list(state: &ViewState<Vec<Letter>>) -> String {
    let mut out = heading(
        "Letters to Gauta",
        "Heartfelt messages and beautiful words from friends who care",
    );
    out.push_str("Write a Letter (/write-letter)\n\n");
    out.push_str(&render_state(
        state,
        "Loading letters...",
        "No Letters Yet\nBe the first to write a heartfelt letter to Gauta!",
        |letters| {
            let mut body = String::new();
            for letter in letters {
                body.push_str(&format!("{}  (/letters/{})\n", letter.title, letter.id));
                body.push_str(&format!("{}\n", letter.snippet()));
                body.push_str(&format!(
                    "— {}  {}\n\n",
                    letter.author_name,
                    short_date(&letter.created_at)
                ));
            }
            body
        },
    ));
    out
}

/// `Empty` means the letter does not exist.
pub fn render_detail(state: &ViewState<Letter>) -> String {
    let mut out = String::from("← Back to Letters (/letters)\n\n");
    out.push_str(&render_state(
        state,
        "Loading letter...",
        "Letter Not Found\nThe letter you're looking for doesn't exist or has been removed.",
        |letter| {
            let mut body = heading(&letter.title, &long_date(&letter.created_at));
            body.push_str(&letter.content);
            body.push_str("\n\n");
            body.push_str(rule());
            body.push_str(&format!("\nWith love, {}\n", letter.author_name));
            body
        },
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn letter() -> Letter {
        Letter {
            id: Uuid::from_u128(7),
            title: "Dear Gauta".into(),
            content: "a".repeat(200),
            author_name: "Sam".into(),
            created_at: Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn list_shows_snippets_and_links() {
        let page = render_list(&ViewState::Ready(vec![letter()]));
        assert!(page.contains(&format!("/letters/{}", Uuid::from_u128(7))));
        assert!(page.contains(&format!("{}...", "a".repeat(150))));
        assert!(!page.contains(&"a".repeat(151)));
        assert!(page.contains("— Sam  12/25/2024"));
    }

    #[test]
    fn empty_list() {
        assert!(render_list(&ViewState::Empty).contains("No Letters Yet"));
    }

    #[test]
    fn detail_shows_everything() {
        let page = render_detail(&ViewState::Ready(letter()));
        assert!(page.contains("Dear Gauta"));
        assert!(page.contains("December 25, 2024"));
        assert!(page.contains(&"a".repeat(200)));
        assert!(page.contains("With love, Sam"));
    }

    #[test]
    fn missing_letter() {
        assert!(render_detail(&ViewState::Empty).contains("Letter Not Found"));
    }
}
