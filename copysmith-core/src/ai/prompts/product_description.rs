//! Prompt for writing a WooCommerce product description as raw HTML.

/// Prompt name for logs.
pub const PRODUCT_DESCRIPTION_PROMPT_NAME: &str = "product_description";

/// Render the system prompt for product descriptions.
pub fn render_product_description_system_prompt() -> String {
    "You are an expert e-commerce copywriter producing clean HTML only.".to_string()
}

/// Render the user message with the product details filled in.
///
/// Each value is substituted once; text inside the values is never treated
/// as a placeholder.
pub fn render_product_description_user_prompt(title: &str, raw_info: &str, brand: &str) -> String {
    format!(
        r#"Generate a detailed HTML product description for a WooCommerce product page. The product is a high-end designer mirror. The content should include:

1. Product Overview – a paragraph highlighting the product’s design, functionality, and materials.
2. Key Features – a bullet list of key product features such as materials, mounting options, and safety enhancements.
3. Additional Information – covering design details, usability, maintenance, and safety features.
4. Specifications Table – presented in an HTML <table>, listing dimensions, glass thickness, weight, finish options, and warranty.
5. Guarantee – a short paragraph on warranty and customer support.
6. Included Items – a bullet list of items included in the box.
7. About the Brand – a final paragraph describing the brand’s identity, craftsmanship, and design philosophy.

add numbers to the headings. 
For each of the above points use an H1 or H2 tag for headings, and ensure the content is structured with appropriate HTML tags.

Following are the details about the product:
Title: {title}
Raw Info: {raw_info}
Brand: {brand}

Structure the output using semantic HTML, using appropriate tags like <p>, <ul>, <li>, <table>, <thead>, <tbody>, and <strong> where needed. Do not include any styling (no inline CSS). Only return the raw HTML content, no extra explanations."#,
        title = title,
        raw_info = raw_info,
        brand = brand
    )
}
