pub const FOOD_NAMES: &str = include_str!("../data/prompts/food_names.txt");
pub const NUTRITION: &str = include_str!("../data/prompts/nutrition.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
