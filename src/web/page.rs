use std::fmt::Write;

use crate::generate::GeneratedPlan;
use crate::profile::{UserProfile, AGE_RANGE, CONDITION_LABELS, HEIGHT_RANGE, WEIGHT_RANGE};

const STYLE: &str = r#"
body { margin: 0; font-family: 'Arial', sans-serif; display: flex; min-height: 100vh; }
.sidebar { width: 220px; background-color: #f0f2f6; padding: 24px; }
.sidebar h2 { font-size: 1.2em; }
.main { flex: 1; padding: 24px 48px; }
.main-header { font-size: 3em; color: #2874f0; text-align: center; }
.sub-header { font-size: 1.5em; color: #2874f0; text-align: center; }
.input-section { background-color: #f7f9fc; padding: 20px; border-radius: 10px; box-shadow: 0 0 10px rgba(0,0,0,0.1); margin: 20px 0; }
.input-section label { display: block; margin-top: 12px; }
.input-section input, .input-section select, .input-section textarea { width: 100%; padding: 6px; box-sizing: border-box; }
.submit { text-align: center; }
.submit button { background-color: #2874f0; color: white; font-size: 16px; padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; }
.submit button:hover { background-color: #1e5ab6; color: white; }
.plan { white-space: pre-wrap; margin-top: 24px; }
.error { margin-top: 24px; padding: 12px; border-radius: 5px; background-color: #fde8e8; color: #b42318; }
.footer { font-size: 0.8em; color: #999999; text-align: center; padding: 20px; }
"#;

/// Fork-and-knife emoji as an inline SVG icon
const FAVICON: &str = "data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🍴</text></svg>";

const TOGGLE_SCRIPT: &str = r#"
function toggleSymptoms(select) {
  document.getElementById('symptoms-field').style.display = select.value === 'Other' ? 'block' : 'none';
}
"#;

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the whole page with `profile` filled into the form and an optional result below it.
pub fn render(profile: &UserProfile, plan: Option<&GeneratedPlan>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Healthy Meal Planner</title>\n");
    let _ = writeln!(html, "<link rel=\"icon\" href=\"{}\">", FAVICON);
    let _ = write!(html, "<style>{}</style>\n<script>{}</script>\n", STYLE, TOGGLE_SCRIPT);
    html.push_str("</head>\n<body>\n");

    html.push_str("<aside class=\"sidebar\"><h2>Healthy Meal Planner 🍴</h2></aside>\n");
    html.push_str("<main class=\"main\">\n");
    html.push_str("<div class=\"main-header\">Welcome to the Healthy Meal Planner!</div>\n");
    html.push_str("<div class=\"sub-header\">A web application that helps you design nutrient-rich meals based on your health condition or personal details</div>\n");

    render_form(&mut html, profile);

    match plan {
        Some(GeneratedPlan::Plan(text)) => {
            let _ = writeln!(html, "<div class=\"plan\">{}</div>", escape_html(text));
        }
        Some(GeneratedPlan::Failed(message)) => {
            let _ = writeln!(
                html,
                "<div class=\"error\" role=\"alert\">{}</div>",
                escape_html(message)
            );
        }
        None => {}
    }

    html.push_str("<div class=\"footer\">&copy; 2024 Healthy Meal Planner - Eat Smart, Live Well</div>\n");
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, profile: &UserProfile) {
    html.push_str("<form method=\"post\" action=\"/\">\n<div class=\"input-section\">\n<h2>Personal Details</h2>\n");

    number_input(html, "age", "Enter your age:", AGE_RANGE, profile.age);
    number_input(html, "weight", "Enter your weight (in kg):", WEIGHT_RANGE, profile.weight_kg);
    number_input(html, "height", "Enter your height (in cm):", HEIGHT_RANGE, profile.height_cm);

    let selected = profile.condition.label();
    html.push_str("<label for=\"condition\">Select your condition:</label>\n");
    html.push_str("<select id=\"condition\" name=\"condition\" onchange=\"toggleSymptoms(this)\">\n");
    for label in CONDITION_LABELS {
        let marker = if label == selected { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape_html(label),
            marker
        );
    }
    html.push_str("</select>\n");

    let display = if selected == "Other" { "block" } else { "none" };
    let _ = writeln!(
        html,
        "<div id=\"symptoms-field\" style=\"display: {}\">\n<label for=\"symptoms\">Enter your symptoms (separated by commas):</label>\n<textarea id=\"symptoms\" name=\"symptoms\" rows=\"3\">{}</textarea>\n</div>",
        display,
        escape_html(profile.condition.symptoms())
    );

    html.push_str("</div>\n<div class=\"submit\"><button type=\"submit\">Generate Meal Plan</button></div>\n</form>\n");
}

fn number_input(html: &mut String, name: &str, label: &str, range: (u32, u32), value: u32) {
    let _ = writeln!(
        html,
        "<label for=\"{name}\">{label}</label>\n<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\">",
        name = name,
        label = label,
        min = range.0,
        max = range.1,
        value = value,
    );
}
