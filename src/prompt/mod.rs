use crate::profile::{Condition, UserProfile};

/// Fixed instruction appended to every user prompt
pub const SYSTEM_PROMPT: &str = "
As a highly knowledgeable nutritionist AI, your task is to design nutrient-rich meals for breakfast, lunch, dinner, and supper based on specific diseases or for non-disease individuals. For non-disease individuals, you will take into account their age, weight, and height to generate a personalized healthy diet plan.

Please provide a structured response with the following sections:

1. **Breakfast**: Nutrient-rich meal recommendations.
2. **Lunch**: Nutrient-rich meal recommendations.
3. **Dinner**: Nutrient-rich meal recommendations.
4. **Supper**: Nutrient-rich meal recommendations.
";

/// User-specific part of the prompt.
///
/// Without a condition the body measurements are sent; with one, only the
/// condition and its symptoms are.
pub fn user_prompt(profile: &UserProfile) -> String {
    match &profile.condition {
        Condition::None => format!(
            "Age: {}, Weight: {} kg, Height: {} cm. Generate a healthy diet plan.",
            profile.age, profile.weight_kg, profile.height_cm
        ),
        condition => format!(
            "Condition: {}, Symptoms: {}. Generate a meal plan to manage this condition.",
            condition,
            condition.symptoms()
        ),
    }
}

/// Complete text sent to the generation service as a single message
pub fn build_prompt(profile: &UserProfile) -> String {
    format!("{}\n{}", user_prompt(profile), SYSTEM_PROMPT)
}
