//! AI prompt templates.

pub mod product_description;

pub use product_description::{
    render_product_description_system_prompt, render_product_description_user_prompt,
    PRODUCT_DESCRIPTION_PROMPT_NAME,
};
