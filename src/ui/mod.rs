use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::generate::GeneratedPlan;
use crate::profile::{
    parse_clamped, Condition, UserProfile, AGE_RANGE, CONDITION_LABELS, DEFAULT_AGE,
    DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, HEIGHT_RANGE, WEIGHT_RANGE,
};

/// Display welcome message
pub fn display_welcome() {
    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                  Healthy Meal Planner 🍴                      ║");
    println!("╠═══════════════════════════════════════════════════════════════╣");
    println!("║  Design nutrient-rich meals for breakfast, lunch, dinner and  ║");
    println!("║  supper based on your health condition or personal details.   ║");
    println!("║                                                               ║");
    println!("║        This is NOT medical advice. Consult a doctor or        ║");
    println!("║        dietitian before changing your diet.                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
}

/// Ask for the profile on stdin
pub fn read_profile() -> io::Result<UserProfile> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    read_profile_from(&mut input, &mut output)
}

/// Ask for the profile on arbitrary streams. Blank answers keep the defaults.
pub fn read_profile_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<UserProfile> {
    writeln!(output, "\n═══════════════════════════════════════════════════════════════")?;
    writeln!(output, "                        PERSONAL DETAILS")?;
    writeln!(output, "═══════════════════════════════════════════════════════════════")?;

    let age = ask_number(input, output, "Enter your age", AGE_RANGE, DEFAULT_AGE)?;
    let weight_kg = ask_number(
        input,
        output,
        "Enter your weight (in kg)",
        WEIGHT_RANGE,
        DEFAULT_WEIGHT_KG,
    )?;
    let height_cm = ask_number(
        input,
        output,
        "Enter your height (in cm)",
        HEIGHT_RANGE,
        DEFAULT_HEIGHT_CM,
    )?;
    let condition = ask_condition(input, output)?;

    Ok(UserProfile {
        age,
        weight_kg,
        height_cm,
        condition,
    })
}

fn ask_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    range: (u32, u32),
    default: u32,
) -> io::Result<u32> {
    write!(output, "{} [{}-{}, default {}]: ", label, range.0, range.1, default)?;
    output.flush()?;
    let answer = read_line(input)?;
    Ok(parse_clamped(&answer, range, default))
}

fn ask_condition<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Condition> {
    writeln!(output, "Select your condition:")?;
    for (i, label) in CONDITION_LABELS.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, label)?;
    }
    write!(output, "Choice [1]: ")?;
    output.flush()?;

    let answer = read_line(input)?;
    let label = answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| CONDITION_LABELS.get(i).copied())
        .or_else(|| {
            CONDITION_LABELS
                .iter()
                .find(|l| l.eq_ignore_ascii_case(&answer))
                .copied()
        })
        .unwrap_or("None");

    let symptoms = if label == "Other" {
        write!(output, "Enter your symptoms (separated by commas): ")?;
        output.flush()?;
        read_line(input)?
    } else {
        String::new()
    };

    // Labels come from CONDITION_LABELS, so this cannot fail
    Condition::from_label(label, &symptoms)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Spinner shown while waiting on the generation service
pub fn generation_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Generating your meal plan...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Display the prompt in dry-run mode
pub fn display_prompt(prompt: &str) {
    println!("\n─────────────────────────── PROMPT ────────────────────────────");
    println!("{}", prompt);
    println!("───────────────────────────────────────────────────────────────");
}

/// Display the generated plan or the error message
pub fn display_plan(plan: &GeneratedPlan) {
    if plan.is_error() {
        eprintln!("\n{}", plan.text());
        return;
    }

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("                        YOUR MEAL PLAN");
    println!("═══════════════════════════════════════════════════════════════\n");
    println!("{}", plan.text());
    println!("\n═══════════════════════════════════════════════════════════════");
    println!("           Eat Smart, Live Well. This is NOT medical advice.");
    println!("═══════════════════════════════════════════════════════════════\n");
}

/// Ask user if they want another plan
pub fn ask_generate_again() -> io::Result<bool> {
    println!("\nWould you like to generate another meal plan? (y/n)");

    let stdin = io::stdin();
    let input = read_line(&mut stdin.lock())?.to_lowercase();
    Ok(input == "y" || input == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(answers: &str) -> UserProfile {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        read_profile_from(&mut input, &mut output).unwrap()
    }

    #[test]
    fn test_blank_answers_use_defaults() {
        assert_eq!(read("\n\n\n\n"), UserProfile::default());
    }

    #[test]
    fn test_numbers_are_clamped() {
        let profile = read("200\n-3\n180\n2\n");
        assert_eq!(profile.age, 120);
        assert_eq!(profile.weight_kg, 0);
        assert_eq!(profile.height_cm, 180);
        assert_eq!(profile.condition, Condition::Diabetes);
    }

    #[test]
    fn test_condition_by_name() {
        let profile = read("\n\n\ncardiovascular disease\n");
        assert_eq!(profile.condition, Condition::CardiovascularDisease);
    }

    #[test]
    fn test_other_asks_for_symptoms() {
        let mut input = Cursor::new(b"30\n60\n165\n5\nfatigue, thirst\n".to_vec());
        let mut output = Vec::new();
        let profile = read_profile_from(&mut input, &mut output).unwrap();

        assert_eq!(
            profile.condition,
            Condition::Other {
                symptoms: "fatigue, thirst".to_string()
            }
        );
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter your symptoms (separated by commas)"));
        assert!(shown.contains("4. Cardiovascular Disease"));
    }

    #[test]
    fn test_out_of_menu_choice_means_none() {
        let profile = read("\n\n\n9\n");
        assert_eq!(profile.condition, Condition::None);
    }
}
