//! Server-rendered HTML pages.
//!
//! Pages are assembled from string fragments. Every piece of user-supplied
//! text goes through [`html_escape`] before it lands in the markup.

use axum::http::StatusCode;
use mypoll_core::{Category, QuestionWithChoices};
use mypoll_db::entities::question;

/// Shown on a listing with nothing to list.
pub const EMPTY_LISTING: &str = "No polls are available.";

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        html_escape(title)
    )
}

fn category_badge(category: Category) -> String {
    category.label().map_or_else(String::new, |label| {
        format!(
            " <span class=\"category {}\">{label}</span>",
            label.to_lowercase()
        )
    })
}

fn detail_url(id: i32) -> String {
    format!("/polls/{id}/")
}

/// Listing page: one link per question, newest first.
#[must_use]
pub fn listing(title: &str, questions: &[question::Model]) -> String {
    let mut body = format!("<h1>{}</h1>\n", html_escape(title));

    if questions.is_empty() {
        body.push_str(&format!("<p>{EMPTY_LISTING}</p>\n"));
    } else {
        body.push_str("<ul>\n");
        for q in questions {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a>{}</li>\n",
                detail_url(q.id),
                html_escape(&q.question_text),
                category_badge(Category::from_rate(q.rate))
            ));
        }
        body.push_str("</ul>\n");
    }

    layout(title, &body)
}

/// Voting page with one radio button per choice.
#[must_use]
pub fn detail(poll: &QuestionWithChoices, error_message: Option<&str>) -> String {
    let q = &poll.question;
    let mut body = format!(
        "<form action=\"/polls/{}/vote/\" method=\"post\">\n<fieldset>\n<legend><h1>{}</h1></legend>\n",
        q.id,
        html_escape(&q.question_text)
    );

    if let Some(message) = error_message {
        body.push_str(&format!(
            "<p class=\"error\"><strong>{}</strong></p>\n",
            html_escape(message)
        ));
    }

    for (counter, choice) in poll.choices.iter().enumerate().map(|(i, c)| (i + 1, c)) {
        body.push_str(&format!(
            "<input type=\"radio\" name=\"choice\" id=\"choice{counter}\" value=\"{}\">\n\
             <label for=\"choice{counter}\">{}</label><br>\n",
            choice.id,
            html_escape(&choice.choice_text)
        ));
    }

    body.push_str("</fieldset>\n<input type=\"submit\" value=\"Vote\">\n</form>\n");
    body.push_str("<a href=\"/polls/\">Back</a>\n");

    layout(&q.question_text, &body)
}

/// Results page with each choice's tally.
#[must_use]
pub fn results(poll: &QuestionWithChoices) -> String {
    let q = &poll.question;
    let mut body = format!(
        "<h1>{}{}</h1>\n<ul>\n",
        html_escape(&q.question_text),
        category_badge(poll.category)
    );

    for choice in &poll.choices {
        let noun = if choice.votes == 1 { "vote" } else { "votes" };
        body.push_str(&format!(
            "<li>{} -- {} {noun}</li>\n",
            html_escape(&choice.choice_text),
            choice.votes
        ));
    }

    body.push_str("</ul>\n");
    body.push_str(&format!(
        "<a href=\"{}\">Vote again?</a>\n<a href=\"/polls/\">Back</a>\n",
        detail_url(q.id)
    ));

    layout(&q.question_text, &body)
}

/// Generic error page.
#[must_use]
pub fn error(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/polls/\">Back</a>\n",
        html_escape(title),
        html_escape(message)
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mypoll_db::entities::choice;

    fn question(id: i32, text: &str, rate: i32) -> question::Model {
        question::Model {
            id,
            question_text: text.to_string(),
            pub_date: Utc::now().into(),
            rate,
            is_private: false,
        }
    }

    fn poll(rate: i32, votes: &[i32]) -> QuestionWithChoices {
        QuestionWithChoices {
            question: question(1, "What's up?", rate),
            choices: votes
                .iter()
                .enumerate()
                .map(|(i, &v)| choice::Model {
                    id: i as i32 + 10,
                    question_id: 1,
                    choice_text: format!("Choice {}", i + 1),
                    votes: v,
                })
                .collect(),
            category: Category::from_rate(rate),
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"it's\""), "&quot;it&#x27;s&quot;");
    }

    #[test]
    fn test_empty_listing() {
        let html = listing("Latest polls", &[]);
        assert!(html.contains(EMPTY_LISTING));
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn test_listing_links_and_badges() {
        let html = listing(
            "Latest polls",
            &[question(3, "Hot one", 51), question(2, "Warm one", 11), question(1, "Quiet", 10)],
        );
        assert!(html.contains("<li><a href=\"/polls/3/\">Hot one</a> <span class=\"category hot\">HOT</span></li>"));
        assert!(html.contains("<li><a href=\"/polls/2/\">Warm one</a> <span class=\"category warm\">WARM</span></li>"));
        assert!(html.contains("<li><a href=\"/polls/1/\">Quiet</a></li>"));
    }

    #[test]
    fn test_listing_escapes_question_text() {
        let html = listing("Latest polls", &[question(1, "<b>bold</b>", 0)]);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_detail_has_form_and_radios() {
        let html = detail(&poll(0, &[0, 0]), None);
        assert!(html.contains("<form action=\"/polls/1/vote/\" method=\"post\">"));
        assert!(html.contains("name=\"choice\" id=\"choice1\" value=\"10\""));
        assert!(html.contains("name=\"choice\" id=\"choice2\" value=\"11\""));
        assert!(html.contains("<input type=\"submit\" value=\"Vote\">"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_detail_shows_error_message() {
        let html = detail(&poll(0, &[0]), Some("You didn't select a choice."));
        assert!(html.contains("<strong>You didn&#x27;t select a choice.</strong>"));
    }

    #[test]
    fn test_results_pluralizes_and_links_back() {
        let html = results(&poll(51, &[1, 2]));
        assert!(html.contains("<li>Choice 1 -- 1 vote</li>"));
        assert!(html.contains("<li>Choice 2 -- 2 votes</li>"));
        assert!(html.contains("HOT"));
        assert!(html.contains("<a href=\"/polls/1/\">Vote again?</a>"));
        assert!(html.contains("<a href=\"/polls/\">Back</a>"));
    }

    #[test]
    fn test_error_page() {
        let html = error(StatusCode::NOT_FOUND, "Not found: Question 9");
        assert!(html.contains("<h1>Not Found</h1>"));
        assert!(html.contains("Question 9"));
    }
}
