//! HTML page for the two panels
//!
//! Declares every field constraint on the widget (min/max/options) and keeps
//! current values selected, so one `<form>` round-trips the whole state. The
//! two buttons post the same fields to different actions.

use std::fmt::Write;

use super::render::{Block, FormState, View};
use crate::models::types::{
    Category, YesNo, AGE_MAX, AGE_MIN, BALANCE_MAX, BALANCE_MIN,
    CREDIT_SCORE_MAX, CREDIT_SCORE_MIN,
};

pub const PAGE_TITLE: &str = "Solvency & Loan Prediction";
pub const FOOTER: &str = "© 2024 - Solvency & Credit Prediction";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
h1 { text-align: center; color: #2C3E50; }
.panels { display: flex; gap: 2rem; }
.panel { flex: 1; border: 2px solid #2980B9; border-radius: 10px; padding: 20px; }
label { display: block; font-size: 18px; color: #2980B9; font-weight: bold; margin-top: 12px; }
input, select { border: 2px solid #2ECC71; padding: 10px; border-radius: 5px; width: 100%; box-sizing: border-box; }
button { margin-top: 16px; padding: 10px 16px; }
.result { font-size: 20px; text-align: center; }
.success, .info { color: #2ECC71; }
.rejection, .error { color: #C0392B; }
.footer { font-size: 18px; color: #7F8C8D; text-align: center; }
"#;

/// Minimal escaping for text and attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn select(out: &mut String, name: &str, label: &str, options: &[&str], current: &str) {
    let _ = write!(out, r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">"#);
    for option in options {
        let selected = if *option == current { " selected" } else { "" };
        let value = escape_html(option);
        let _ = write!(out, r#"<option value="{value}"{selected}>{value}</option>"#);
    }
    out.push_str("</select>");
}

fn category_select<C: Category>(out: &mut String, label: &str, current: C) {
    let options: Vec<&str> = C::options().iter().map(|o| o.as_str()).collect();
    select(out, C::COLUMN, label, &options, current.as_str());
}

fn number(out: &mut String, name: &str, label: &str, min: &str, max: &str, step: &str, value: &str) {
    let _ = write!(
        out,
        r#"<label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required>"#
    );
}

fn blocks(out: &mut String, blocks: &[Block]) {
    for block in blocks {
        let _ = write!(
            out,
            r#"<p class="{}">{}</p>"#,
            block.css_class(),
            escape_html(block.text())
        );
    }
}

/// Render the full page for a state and its view
pub fn render_page(state: &FormState, view: &View) -> String {
    let applicant = &state.applicant;
    let yes_no: Vec<&str> = YesNo::options().iter().map(|o| o.as_str()).collect();

    let mut out = String::with_capacity(8 * 1024);
    let _ = write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body><h1>{PAGE_TITLE}</h1><form method="post" action="/solvency"><div class="panels">"#
    );

    // Panel 1: solvency and credit score
    out.push_str(r#"<section class="panel" id="solvency-panel">"#);
    number(
        &mut out,
        "age",
        "Age",
        &AGE_MIN.to_string(),
        &AGE_MAX.to_string(),
        "1",
        &applicant.age.to_string(),
    );
    category_select(&mut out, "Job", applicant.job);
    category_select(&mut out, "Marital status", applicant.marital);
    category_select(&mut out, "Education level", applicant.education);
    number(
        &mut out,
        "balance",
        "Bank balance ($)",
        &BALANCE_MIN.to_string(),
        &BALANCE_MAX.to_string(),
        "1",
        &applicant.balance.to_string(),
    );
    select(&mut out, "housing", "Owns a home", &yes_no, applicant.housing.as_str());
    select(&mut out, "loan", "Loan in progress", &yes_no, applicant.loan.as_str());
    out.push_str(r#"<button type="submit" formaction="/solvency" formnovalidate>Predict solvency</button>"#);
    blocks(&mut out, &view.solvency);
    out.push_str("</section>");

    // Panel 2: loan amount
    out.push_str(r#"<section class="panel" id="loan-panel">"#);
    number(
        &mut out,
        "credit_score",
        "Enter the credit score",
        &format!("{:.1}", CREDIT_SCORE_MIN),
        &format!("{:.1}", CREDIT_SCORE_MAX),
        "any",
        &state.score_input.credit_score.to_string(),
    );
    out.push_str(r#"<button type="submit" formaction="/loan" formnovalidate>Predict loan amount</button>"#);
    blocks(&mut out, &view.loan);
    out.push_str("</section>");

    let _ = write!(
        out,
        r#"</div></form><hr><p class="footer">{FOOTER}</p></body></html>"#
    );
    out
}

/// Page shown when submitted fields violate the declared constraints
pub fn render_input_error(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body><h1>{PAGE_TITLE}</h1><p class="result error">{}</p><p class="footer"><a href="/">Back to the form</a></p></body></html>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::render::PanelStatus;
    use crate::models::types::{
        ApplicantRecord, Education, Job, Marital, ScoreInput, SolvencyOutcome,
    };

    #[test]
    fn test_escape() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_page_declares_constraints() {
        let state = FormState::default();
        let html = render_page(&state, &View::of(&state));

        assert!(html.contains(r#"name="age" min="18" max="120""#));
        assert!(html.contains(r#"name="balance" min="-100000" max="1000000""#));
        assert!(html.contains(r#"name="credit_score" min="0.0" max="1000.0""#));
        assert!(html.contains(r#"<option value="admin." selected>admin.</option>"#));
        assert!(html.contains(r#"<option value="self-employed">self-employed</option>"#));
        // each panel is checked server-side only for its own fields
        assert!(html.contains(r#"formaction="/solvency" formnovalidate"#));
        assert!(html.contains(r#"formaction="/loan" formnovalidate"#));
        assert!(html.contains(FOOTER));
        assert!(!html.contains("class=\"result"));
    }

    #[test]
    fn test_page_keeps_current_values_and_results() {
        let mut applicant = ApplicantRecord::default();
        applicant.marital = Marital::Divorced;
        applicant.education = Education::Tertiary;
        applicant.job = Job::Student;
        let state = FormState {
            solvency: PanelStatus::Rendered(SolvencyOutcome::NotSolvent),
            ..FormState::new(applicant, ScoreInput::new(650.5).unwrap())
        };

        let html = render_page(&state, &View::of(&state));
        assert!(html.contains(r#"<option value="divorced" selected>"#));
        assert!(html.contains(r#"<option value="tertiary" selected>"#));
        assert!(html.contains(r#"<option value="student" selected>"#));
        assert!(html.contains(r#"value="650.5""#));
        assert!(html.contains("not solvent"));
    }

    #[test]
    fn test_input_error_page_escapes_message() {
        let html = render_input_error("[INPUT_OUT_OF_RANGE] age must be <= 120");
        assert!(html.contains("age must be &lt;= 120"));
        assert!(html.contains(r#"href="/""#));
    }
}
