//! Prompt templates for the live generation path

use crate::article::entities::Article;
use crate::persona::entities::Persona;

/// Templates for building model prompts from domain entities
pub struct PerspectivePrompt;

impl PerspectivePrompt {
    /// Role-establishing system prompt rendered from the persona's attributes
    pub fn system(persona: &Persona) -> String {
        format!(
            r#"You are {name}, {title}.

Your personality traits: {traits}
Your speaking style: {style}
Your areas of expertise: {expertise}
Your quirks and unique characteristics: {quirks}

You will analyze news articles and provide your unique perspective based on who you are. Stay completely in character. Your analysis should reflect your worldview, expertise, and personality quirks."#,
            name = persona.name,
            title = persona.title,
            traits = persona.traits.join(", "),
            style = persona.speaking_style,
            expertise = persona.expertise,
            quirks = persona.quirks.join(", "),
        )
    }

    /// Task prompt embedding the article and the required output shape
    pub fn task(article: &Article) -> String {
        format!(
            r#"Please analyze this news article and provide your unique perspective:

Title: {title}
Category: {category}

Content:
{content}

Provide your response in the following JSON format:
{{
  "headline": "Your catchy headline for this take (in your voice)",
  "content": "Your full analysis (2-3 paragraphs, in your voice and perspective)",
  "keyPoints": ["Key point 1", "Key point 2", "Key point 3"],
  "sentiment": "positive|negative|neutral|mixed"
}}"#,
            title = article.title,
            category = article.category,
            content = article.content,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slug::Slug;
    use crate::persona::entities::PersonaCategory;
    use chrono::Utc;

    #[test]
    fn test_system_prompt_renders_joined_lists() {
        let persona = Persona::new(
            "p-1",
            Slug::new("socrates").unwrap(),
            "Socrates",
            "Ancient Greek Philosopher",
            PersonaCategory::Philosopher,
            Utc::now(),
        )
        .with_traits(vec!["inquisitive".to_string(), "wise".to_string()])
        .with_speaking_style("Questions everything.")
        .with_expertise("Ethics")
        .with_quirks(vec!["Claims to know nothing".to_string()]);

        let prompt = PerspectivePrompt::system(&persona);
        assert!(prompt.contains("You are Socrates, Ancient Greek Philosopher."));
        assert!(prompt.contains("inquisitive, wise"));
        assert!(prompt.contains("Claims to know nothing"));
    }

    #[test]
    fn test_task_prompt_embeds_article_and_shape() {
        let article = Article::new(
            "a-1",
            Slug::new("test-event").unwrap(),
            "Test Event",
            "admin",
            Utc::now(),
        )
        .with_summary("s")
        .with_content("Full body text.")
        .with_category("General");

        let prompt = PerspectivePrompt::task(&article);
        assert!(prompt.contains("Title: Test Event"));
        assert!(prompt.contains("Category: General"));
        assert!(prompt.contains("Full body text."));
        assert!(prompt.contains("\"keyPoints\""));
        assert!(prompt.contains("positive|negative|neutral|mixed"));
    }
}
