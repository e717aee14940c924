use crate::models::{text_or_undefined, PhotoshootRequest};

pub const COMMON: &str = include_str!("../data/prompts/common.txt");
pub const PERSON: &str = include_str!("../data/prompts/person.txt");
pub const PRODUCT: &str = include_str!("../data/prompts/product.txt");

pub const PERSON_FALLBACK_DETAILS: &str = "Sophisticated, contemporary aesthetic.";
pub const PRODUCT_FALLBACK_DETAILS: &str = "Minimalist, high-end product presentation.";

/// Replace `{{key}}` placeholders in a template string.
///
/// Substituted values are copied verbatim and never scanned for further
/// placeholders. Unknown keys are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    result.push_str(rest);
    result
}

/// Build the image prompt for a photoshoot request.
///
/// `type == "person"` selects the person template, everything else the product
/// template. Missing fields render as `undefined`.
pub fn build_prompt(request: &PhotoshootRequest) -> String {
    let common = render(
        COMMON,
        &[("time_of_day", text_or_undefined(&request.time_of_day))],
    );
    let common = common.trim_end();
    let number_of_items = request.item_count_label();

    let prompt = if request.is_person() {
        render(
            PERSON,
            &[
                ("common", common),
                ("gender", text_or_undefined(&request.person_gender)),
                ("age", text_or_undefined(&request.person_age)),
                ("hairstyle", text_or_undefined(&request.person_hairstyle)),
                ("clothing", text_or_undefined(&request.person_clothing)),
                ("location", text_or_undefined(&request.location)),
                ("style", text_or_undefined(&request.style)),
                ("number_of_items", number_of_items.as_str()),
                (
                    "additional_details",
                    details_or(&request.additional_details, PERSON_FALLBACK_DETAILS),
                ),
            ],
        )
    } else {
        render(
            PRODUCT,
            &[
                ("common", common),
                ("product_type", text_or_undefined(&request.product_type)),
                ("color", text_or_undefined(&request.product_color)),
                ("material", text_or_undefined(&request.product_material)),
                ("brand", text_or_undefined(&request.product_brand)),
                ("location", text_or_undefined(&request.location)),
                ("style", text_or_undefined(&request.style)),
                ("number_of_items", number_of_items.as_str()),
                (
                    "additional_details",
                    details_or(&request.additional_details, PRODUCT_FALLBACK_DETAILS),
                ),
            ],
        )
    };

    prompt.trim_end().to_string()
}

fn details_or<'a>(details: &'a Option<String>, fallback: &'a str) -> &'a str {
    match details.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    }
}
