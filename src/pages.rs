//! Server-rendered HTML pages.
//!
//! Every page is a complete document built with `format!`. All text coming
//! from the collaborator or the user goes through [`escape_html`].

use crate::coercion::RATING_SCALE;
use crate::form::{self, FieldErrors, FieldView, FormInput, Widget};
use crate::models::ReviewLinks;
use crate::survey::Survey;

// User-facing copy. Every message is one line.
pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить опрос";
pub const MSG_SUBMIT_FAILED: &str = "Ошибка отправки. Проверьте ответы и попробуйте снова.";
pub const MSG_VALIDATION_FAILED: &str = "Ответьте на обязательные вопросы и проверьте ответы.";
pub const MSG_SUBMIT_IN_PROGRESS: &str = "Ответы уже отправляются, подождите немного.";
pub const MSG_REQUIRED: &str = "Это обязательный вопрос";
pub const MSG_INVALID_VALUE: &str = "Недопустимый ответ";

const LABEL_YES: &str = "Да";
const LABEL_NO: &str = "Нет";

/// The survey form, optionally with a banner and per-question errors.
pub fn survey_page(
    survey: &Survey,
    input: &FormInput,
    errors: &FieldErrors,
    banner: Option<&str>,
) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<h1>Опрос по заказу {}</h1>\n",
        escape_html(survey.order_number())
    ));
    body.push_str(&format!(
        "<p>ПВЗ: {}, {}</p>\n",
        escape_html(&survey.point().city),
        escape_html(&survey.point().name)
    ));

    if let Some(banner) = banner {
        body.push_str(&format!(
            "<p class=\"banner\" role=\"alert\">{}</p>\n",
            escape_html(banner)
        ));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"/s/{}\" class=\"card-list\">\n",
        escape_html(survey.token().as_str())
    ));
    for field in form::field_views(survey, input, errors) {
        body.push_str(&question_card(&field));
    }
    body.push_str("<button type=\"submit\" class=\"big-button\">Отправить</button>\n");
    body.push_str("</form>\n");

    layout("Опрос", &body)
}

fn question_card(field: &FieldView<'_>) -> String {
    let name = field.name();
    let question = field.question;
    let required = if question.is_required { " *" } else { "" };

    let mut html = String::new();
    html.push_str(&format!("<div class=\"card\" id=\"card-{name}\">\n"));
    html.push_str(&format!(
        "  <h3>{}{required}</h3>\n",
        escape_html(&question.text)
    ));

    match field.widget {
        Widget::RatingScale => {
            html.push_str("  <div class=\"rating-row\">\n");
            for n in RATING_SCALE {
                let value = n.to_string();
                html.push_str(&radio(&name, &value, &value, field.raw));
            }
            html.push_str("  </div>\n");
        }
        Widget::YesNo => {
            html.push_str("  <div class=\"button-row\">\n");
            html.push_str(&radio(&name, "true", LABEL_YES, field.raw));
            html.push_str(&radio(&name, "false", LABEL_NO, field.raw));
            html.push_str("  </div>\n");
        }
        Widget::TextArea => {
            // The HTML parser drops one newline right after <textarea>.
            html.push_str(&format!(
                "  <textarea name=\"{name}\" rows=\"4\">\n{}</textarea>\n",
                escape_html(field.raw.unwrap_or_default())
            ));
        }
    }

    if let Some(error) = field.error {
        html.push_str(&format!(
            "  <p class=\"field-error\">{}</p>\n",
            escape_html(error.message())
        ));
    }

    html.push_str("</div>\n");
    html
}

fn radio(name: &str, value: &str, label: &str, current: Option<&str>) -> String {
    let checked = if current == Some(value) { " checked" } else { "" };
    format!(
        "    <label><input type=\"radio\" name=\"{name}\" value=\"{}\"{checked}> {}</label>\n",
        escape_html(value),
        escape_html(label)
    )
}

/// Generic thank-you terminal.
pub fn thanks_page() -> String {
    layout(
        "Спасибо",
        "<div class=\"centered\">\n<h1>Спасибо за ответы!</h1>\n<p>Ваше мнение помогает нам стать лучше.</p>\n</div>\n",
    )
}

/// Review prompt terminal with one outbound link per platform.
pub fn review_page(links: &ReviewLinks) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"centered\">\n");
    body.push_str("<h1>Спасибо за высокую оценку!</h1>\n");
    body.push_str("<p>Будем рады отзыву на внешних площадках:</p>\n");
    body.push_str("<div class=\"card-list\">\n");

    for (platform, url) in links.iter().filter(|(_, url)| !url.is_empty()) {
        body.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\" class=\"big-button\">Оставить отзыв в {}</a>\n",
            escape_html(url),
            escape_html(platform_label(platform))
        ));
    }

    body.push_str("</div>\n</div>\n");
    layout("Оставьте отзыв", &body)
}

fn platform_label(platform: &str) -> &str {
    match platform {
        "2gis" => "2ГИС",
        "yandex" => "Яндекс",
        other => other,
    }
}

/// A single-line error on an otherwise empty page.
pub fn error_page(message: &str) -> String {
    layout(
        "Опрос",
        &format!("<p class=\"banner\" role=\"alert\">{}</p>\n", escape_html(message)),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
<div class="container">
{body}</div>
</body>
</html>"#,
        title = escape_html(title),
        css = CSS,
        body = body,
    )
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
body { font-family: system-ui, -apple-system, sans-serif; background: #f5f6f8; color: #222; margin: 0; }
.container { max-width: 640px; margin: 0 auto; padding: 24px 16px; }
.centered { text-align: center; }
.card-list { display: flex; flex-direction: column; gap: 16px; }
.card { background: #fff; border-radius: 12px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.card h3 { margin: 0 0 12px; font-size: 1.05em; }
.rating-row, .button-row { display: flex; gap: 16px; flex-wrap: wrap; }
textarea { width: 100%; box-sizing: border-box; font: inherit; }
.banner { background: #fdecea; color: #8a1c12; padding: 12px; border-radius: 8px; }
.field-error { color: #b3261e; margin: 8px 0 0; font-size: .9em; }
.big-button { display: block; padding: 14px; border: 0; border-radius: 10px; background: #2d6cdf; color: #fff; font-size: 1em; text-decoration: none; cursor: pointer; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldError;
    use crate::models::QuestionType;
    use crate::survey::tests::{question, survey};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_one_widget_per_question_type() {
        let survey = survey(vec![
            question(1, QuestionType::Rating, true, 0),
            question(2, QuestionType::YesNo, false, 1),
            question(3, QuestionType::Text, false, 2),
        ]);
        let html = survey_page(&survey, &FormInput::default(), &FieldErrors::new(), None);

        for n in 1..=5 {
            assert!(html.contains(&format!(
                "name=\"question_1\" value=\"{n}\""
            )));
        }
        assert!(html.contains("name=\"question_2\" value=\"true\""));
        assert!(html.contains("name=\"question_2\" value=\"false\""));
        assert!(html.contains("<textarea name=\"question_3\""));
        assert!(html.contains("Question 1 *</h3>"));
        assert!(html.contains("Question 2</h3>"));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_entered_values_are_restored() {
        let survey = survey(vec![
            question(1, QuestionType::Rating, true, 0),
            question(2, QuestionType::Text, true, 1),
        ]);
        let mut input = FormInput::default();
        input.set(1, "4");
        input.set(2, "<b>fast</b>");
        let errors: FieldErrors = [(2, FieldError::Required)].into_iter().collect();

        let html = survey_page(&survey, &input, &errors, Some(MSG_SUBMIT_FAILED));

        assert!(html.contains("name=\"question_1\" value=\"4\" checked"));
        assert!(html.contains("&lt;b&gt;fast&lt;/b&gt;</textarea>"));
        assert!(html.contains(MSG_SUBMIT_FAILED));
        assert!(html.contains(MSG_REQUIRED));
    }

    #[test]
    fn test_leading_newline_in_text_survives_rerender() {
        let survey = survey(vec![question(3, QuestionType::Text, false, 0)]);
        let mut input = FormInput::default();
        input.set(3, "\nsecond line");

        let html = survey_page(&survey, &input, &FieldErrors::new(), Some(MSG_SUBMIT_FAILED));

        assert!(html.contains("rows=\"4\">\n\nsecond line</textarea>"));
    }

    #[test]
    fn test_review_page_renders_exact_links() {
        let links: ReviewLinks = [
            ("2gis".to_string(), "https://a".to_string()),
            ("yandex".to_string(), "https://b".to_string()),
        ]
        .into_iter()
        .collect();

        let html = review_page(&links);
        assert_eq!(html.matches("<a href=").count(), 2);
        assert!(html.contains("<a href=\"https://a\""));
        assert!(html.contains("<a href=\"https://b\""));
        assert!(html.contains("2ГИС"));
    }

    #[test]
    fn test_review_page_skips_blank_urls() {
        let links: ReviewLinks = [
            ("2gis".to_string(), String::new()),
            ("yandex".to_string(), "https://b".to_string()),
        ]
        .into_iter()
        .collect();

        let html = review_page(&links);
        assert_eq!(html.matches("<a href=").count(), 1);
    }
}
