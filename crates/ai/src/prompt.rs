//! Prompt construction and templated advice.
//!
//! The templated text is what users see whenever the generator is not ready
//! or a generation call fails, so it must always be non-empty.

use std::fmt::Write as _;

use shopadvisor_core::{Language, Product};

/// Prompt sent to the text generator for an advise request.
pub fn build_advice_prompt(query: &str, products: &[Product], language: Language) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are a helpful shopping assistant. Answer in {}.",
        language.display_name()
    );
    let _ = writeln!(prompt, "Customer request: \"{query}\"");

    if products.is_empty() {
        let _ = writeln!(
            prompt,
            "No matching products were found in the catalog. Suggest what to look for instead."
        );
    } else {
        let _ = writeln!(prompt, "Candidate products:");
        for p in products {
            let _ = writeln!(prompt, "{}", product_line(p));
        }
        let _ = writeln!(
            prompt,
            "Recommend the best option for the customer, compare briefly, and keep it under 150 words."
        );
    }
    prompt
}

/// One bullet line per product, shared by the prompt and the templates.
pub fn product_line(p: &Product) -> String {
    let mut line = format!("- {} ({}) at ₹{}, rated {:.1}/5", p.name, p.brand, p.price, p.rating);
    if !p.features.is_empty() {
        let _ = write!(line, "; {}", p.features.join(", "));
    }
    line
}

/// Advice assembled without the generator.
pub fn templated_advice(query: &str, products: &[Product], language: Language) -> String {
    let best = products.iter().max_by(|a, b| a.rating.total_cmp(&b.rating));

    match (language, best) {
        (Language::En, Some(best)) => {
            let mut text = format!(
                "Here are {} option(s) for \"{query}\". Our top pick is the {} at ₹{} (rated {:.1}/5).\n",
                products.len(),
                best.name,
                best.price,
                best.rating
            );
            for p in products {
                let _ = writeln!(text, "{}", product_line(p));
            }
            text.push_str("Compare warranty and seller ratings before you buy.");
            text
        }
        (Language::Hi, Some(best)) => {
            let mut text = format!(
                "\"{query}\" के लिए {} विकल्प मिले। हमारी सबसे अच्छी पसंद {} है, कीमत ₹{} (रेटिंग {:.1}/5)।\n",
                products.len(),
                best.name,
                best.price,
                best.rating
            );
            for p in products {
                let _ = writeln!(text, "{}", product_line(p));
            }
            text.push_str("खरीदने से पहले वारंटी और विक्रेता रेटिंग ज़रूर देखें।");
            text
        }
        (language, None) => static_advice(language).to_string(),
    }
}

/// Fixed advice used by degraded responses.
pub fn static_advice(language: Language) -> &'static str {
    match language {
        Language::En => {
            "We couldn't personalise advice right now. Set a clear budget, compare ratings and \
             warranty, and prefer sellers with good return policies."
        }
        Language::Hi => {
            "अभी हम व्यक्तिगत सलाह नहीं दे पा रहे हैं। अपना बजट तय करें, रेटिंग और वारंटी की तुलना करें, \
             और अच्छी रिटर्न पॉलिसी वाले विक्रेता चुनें।"
        }
    }
}
