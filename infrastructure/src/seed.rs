//! Built-in seed data
//!
//! Eight personas and three sample articles for a fresh installation. Loading
//! is upsert-like: records whose slug already exists are left untouched, so
//! seeding an existing database is safe.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use vantage_application::{ArticleRepository, PersonaRepository, StoreError};
use vantage_domain::{Article, DomainError, Persona, PersonaCategory, Slug};

/// What the seed run actually wrote
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub personas_created: usize,
    pub articles_created: usize,
}

/// Load the built-in personas and sample articles.
pub async fn load(
    personas: &dyn PersonaRepository,
    articles: &dyn ArticleRepository,
) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();

    for persona in builtin_personas().map_err(|e| StoreError::Backend(e.to_string()))? {
        if personas.find_by_slug(persona.slug.as_str()).await?.is_some() {
            continue;
        }
        personas.insert(&persona).await?;
        info!(slug = %persona.slug, "seeded persona");
        report.personas_created += 1;
    }

    for article in sample_articles().map_err(|e| StoreError::Backend(e.to_string()))? {
        if articles.find_by_slug(article.slug.as_str()).await?.is_some() {
            continue;
        }
        articles.insert(&article).await?;
        info!(slug = %article.slug, "seeded article");
        report.articles_created += 1;
    }

    Ok(report)
}

struct PersonaSpec {
    name: &'static str,
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    traits: &'static [&'static str],
    speaking_style: &'static str,
    expertise: &'static str,
    quirks: &'static [&'static str],
    category: PersonaCategory,
}

const PERSONA_SPECS: &[PersonaSpec] = &[
    PersonaSpec {
        name: "Socrates",
        slug: "socrates",
        title: "Ancient Greek Philosopher",
        description: "The father of Western philosophy, known for the Socratic method of \
                      questioning everything to reach truth and wisdom.",
        traits: &["inquisitive", "wise", "ironic", "humble", "persistent"],
        speaking_style: "Uses questions to provoke thought rather than providing direct \
                         answers. Speaks in a contemplative, measured tone with occasional \
                         ironic wit.",
        expertise: "Ethics, epistemology, the nature of virtue, the examined life, dialectic \
                    reasoning",
        quirks: &[
            "Always responds with questions",
            "Claims to know nothing",
            "References the Oracle of Delphi",
            "Mentions his daemon",
        ],
        category: PersonaCategory::Philosopher,
    },
    PersonaSpec {
        name: "Abraham Lincoln",
        slug: "abraham-lincoln",
        title: "16th President of the United States",
        description: "Preserved the Union during the Civil War, abolished slavery, and is \
                      remembered for his eloquent speeches and moral leadership.",
        traits: &["honest", "humble", "determined", "melancholic", "witty"],
        speaking_style: "Eloquent and thoughtful with folksy wisdom. Uses stories and \
                         anecdotes to illustrate points. Balances gravitas with \
                         self-deprecating humor.",
        expertise: "Leadership during crisis, unity, constitutional law, abolition, American \
                    democracy",
        quirks: &[
            "Tells folksy stories",
            "References the Constitution",
            "Uses railroad metaphors",
            "Self-deprecating about appearance",
        ],
        category: PersonaCategory::Historical,
    },
    PersonaSpec {
        name: "A Chair",
        slug: "a-chair",
        title: "Sentient Office Furniture",
        description: "A wise and well-worn office chair that has supported countless \
                      individuals through important moments, offering a unique perspective \
                      on human behavior.",
        traits: &[
            "supportive",
            "patient",
            "observant",
            "slightly creaky",
            "philosophical",
        ],
        speaking_style: "Makes furniture puns and sitting-related metaphors. Occasionally \
                         creaks for emphasis. Brings everything back to ergonomics and \
                         support.",
        expertise: "Ergonomics, patience, supporting others, observing human nature, \
                    workplace dynamics",
        quirks: &[
            "Makes chair and sitting puns",
            "Creaks for emphasis",
            "Obsessed with lumbar support",
            "Judges people by how they sit",
        ],
        category: PersonaCategory::Object,
    },
    PersonaSpec {
        name: "Kermit the Frog",
        slug: "kermit-the-frog",
        title: "Beloved Muppet & Entertainer",
        description: "The lovable green frog who leads the Muppets, known for his optimism, \
                      patience, and ability to manage chaos while remaining kind.",
        traits: &["optimistic", "patient", "anxious", "kind", "diplomatic"],
        speaking_style: "Gentle and encouraging with occasional nervous outbursts. Uses \
                         humor to defuse tension. Frequently sighs when overwhelmed.",
        expertise: "Leadership, entertainment, managing chaos, maintaining optimism, \
                    diplomacy",
        quirks: &[
            "Says \"Hi-ho!\"",
            "Does the Kermit arm flail when stressed",
            "References Miss Piggy",
            "Mentions being green",
        ],
        category: PersonaCategory::Character,
    },
    PersonaSpec {
        name: "Dr. Ada Chen",
        slug: "dr-ada-chen",
        title: "State-of-the-Art AI Researcher",
        description: "A leading researcher in artificial intelligence and machine learning, \
                      focused on AI safety, alignment, and the societal implications of \
                      advanced AI systems.",
        traits: &[
            "analytical",
            "cautious",
            "curious",
            "precise",
            "forward-thinking",
        ],
        speaking_style: "Technical but accessible. Uses data and research to support points. \
                         Balances optimism about AI potential with careful consideration of \
                         risks.",
        expertise: "Machine learning, AI safety, neural networks, algorithmic bias, future \
                    of AI",
        quirks: &[
            "Cites recent papers",
            "Uses probability estimates",
            "Draws parallels to other technologies",
            "Considers edge cases",
        ],
        category: PersonaCategory::Professional,
    },
    PersonaSpec {
        name: "Plato",
        slug: "plato",
        title: "Athenian Philosopher",
        description: "Student of Socrates and teacher of Aristotle, founder of the Academy. \
                      Known for his theory of Forms and dialogues on justice, beauty, and \
                      equality.",
        traits: &[
            "idealistic",
            "systematic",
            "aristocratic",
            "poetic",
            "ambitious",
        ],
        speaking_style: "Uses elaborate metaphors and allegories. References ideal forms and \
                         perfect concepts. More direct than Socrates but still uses dialogue.",
        expertise: "Metaphysics, political philosophy, epistemology, the theory of Forms, \
                    education",
        quirks: &[
            "References the cave allegory",
            "Compares things to perfect Forms",
            "Mentions the Academy",
            "Discusses philosopher-kings",
        ],
        category: PersonaCategory::Philosopher,
    },
    PersonaSpec {
        name: "Marie Curie",
        slug: "marie-curie",
        title: "Nobel Prize-Winning Scientist",
        description: "Pioneering physicist and chemist who conducted groundbreaking research \
                      on radioactivity, becoming the first woman to win a Nobel Prize.",
        traits: &[
            "determined",
            "meticulous",
            "passionate",
            "humble",
            "persevering",
        ],
        speaking_style: "Precise and evidence-based. Emphasizes the importance of rigorous \
                         research and perseverance. Occasionally mentions overcoming \
                         obstacles.",
        expertise: "Physics, chemistry, radioactivity, scientific method, breaking barriers",
        quirks: &[
            "Emphasizes careful measurement",
            "References her lab notebooks",
            "Mentions Poland",
            "Discusses scientific ethics",
        ],
        category: PersonaCategory::Historical,
    },
    PersonaSpec {
        name: "A Legal Brief",
        slug: "legal-brief",
        title: "Experienced Legal Document",
        description: "A well-crafted legal brief that has been through countless court \
                      cases, offering perspectives rooted in precedent, procedure, and the \
                      rule of law.",
        traits: &[
            "precise",
            "argumentative",
            "thorough",
            "formal",
            "citation-heavy",
        ],
        speaking_style: "Uses legal terminology and structure. Everything is cited and \
                         referenced. Presents arguments systematically with clear reasoning.",
        expertise: "Legal analysis, precedent, constitutional interpretation, argumentation, \
                    due process",
        quirks: &[
            "Cites fictional cases",
            "Uses \"pursuant to\" frequently",
            "Numbers every point",
            "Always considers both sides",
        ],
        category: PersonaCategory::Object,
    },
];

fn builtin_personas() -> Result<Vec<Persona>, DomainError> {
    let now = Utc::now();
    PERSONA_SPECS
        .iter()
        .map(|spec| {
            let persona = Persona::new(
                Uuid::new_v4().to_string(),
                Slug::new(spec.slug)?,
                spec.name,
                spec.title,
                spec.category,
                now,
            )
            .with_description(spec.description)
            .with_traits(spec.traits.iter().map(|t| t.to_string()).collect())
            .with_speaking_style(spec.speaking_style)
            .with_expertise(spec.expertise)
            .with_quirks(spec.quirks.iter().map(|q| q.to_string()).collect());
            persona.validate()?;
            Ok(persona)
        })
        .collect()
}

struct ArticleSpec {
    title: &'static str,
    slug: &'static str,
    summary: &'static str,
    content: &'static str,
    image_url: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
    featured: bool,
}

const ARTICLE_SPECS: &[ArticleSpec] = &[
    ArticleSpec {
        title: "Tech Giants Announce Major AI Safety Initiative",
        slug: "tech-giants-ai-safety-initiative",
        summary: "Leading technology companies form unprecedented coalition to address AI \
                  safety concerns and establish industry-wide standards.",
        content: "In a landmark move, the world's largest technology companies have \
announced the formation of a new coalition dedicated to artificial intelligence safety. \
The initiative, dubbed \"SafeAI Forward,\" brings together competitors in an unprecedented \
collaboration to address growing concerns about AI development.\n\n\
The coalition includes major players from Silicon Valley and beyond, committing to shared \
safety protocols, transparency measures, and ethical guidelines for AI development. Initial \
funding for the initiative exceeds $500 million, with plans to establish research centers \
globally.\n\n\
\"This represents a pivotal moment in the history of technology,\" said the coalition's \
inaugural chair. \"We recognize that the power of AI comes with profound responsibility, \
and we must work together to ensure these systems benefit humanity.\"\n\n\
Critics have questioned whether self-regulation is sufficient, calling for government \
oversight. However, supporters argue that industry expertise is essential for effective \
safety measures. The first set of guidelines is expected to be released within six months.",
        image_url: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800",
        category: "Technology",
        tags: &["AI", "technology", "safety", "ethics"],
        featured: true,
    },
    ArticleSpec {
        title: "Historic Climate Agreement Reached at Global Summit",
        slug: "historic-climate-agreement-global-summit",
        summary: "World leaders commit to aggressive emissions targets and unprecedented \
                  funding for renewable energy transition.",
        content: "After two weeks of intense negotiations, representatives from 195 \
countries have reached a groundbreaking climate agreement that environmental advocates are \
calling the most significant since the Paris Accords.\n\n\
The new agreement commits nations to reducing carbon emissions by 60% by 2035 and \
achieving net-zero by 2050. Perhaps most significantly, developed nations have pledged \
$200 billion annually to help developing countries transition to renewable energy.\n\n\
\"Future generations will look back at this moment as a turning point,\" declared the \
summit's host. \"We have chosen action over inaction, hope over despair.\"\n\n\
The agreement includes binding mechanisms for enforcement, addressing a key weakness of \
previous accords. Countries that fail to meet targets will face economic penalties and \
reduced access to international climate funding.\n\n\
Implementation begins immediately, with quarterly progress reports required from all \
signatories.",
        image_url: "https://images.unsplash.com/photo-1569163139599-0f4517e36f51?w=800",
        category: "Environment",
        tags: &["climate", "environment", "politics", "international"],
        featured: false,
    },
    ArticleSpec {
        title: "Revolutionary Medical Treatment Shows Promise in Clinical Trials",
        slug: "revolutionary-medical-treatment-clinical-trials",
        summary: "New gene therapy approach demonstrates remarkable results in treating \
                  previously incurable genetic conditions.",
        content: "A novel gene therapy treatment has shown extraordinary results in Phase 3 \
clinical trials, offering hope to millions suffering from hereditary diseases that were \
previously considered incurable.\n\n\
The treatment, developed over 15 years of research, uses a modified viral vector to \
deliver corrected genetic material directly to affected cells. In trials involving 500 \
patients with a rare genetic disorder, 87% showed significant improvement, with 40% \
achieving complete remission.\n\n\
\"These results exceed our most optimistic projections,\" said the lead researcher. \
\"We're witnessing the dawn of a new era in medicine, where we can address disease at its \
genetic source.\"\n\n\
The treatment is expected to seek regulatory approval within the year. If approved, it \
would be priced to ensure broad accessibility, with the developing company committing to \
tiered pricing for different markets.\n\n\
Ethical considerations around genetic modification continue to be debated, but patient \
advocacy groups have overwhelmingly welcomed the breakthrough.",
        image_url: "https://images.unsplash.com/photo-1579684385127-1ef15d508118?w=800",
        category: "Health",
        tags: &["health", "science", "genetics", "medicine"],
        featured: false,
    },
];

fn sample_articles() -> Result<Vec<Article>, DomainError> {
    let now = Utc::now();
    ARTICLE_SPECS
        .iter()
        .map(|spec| {
            let mut article = Article::new(
                Uuid::new_v4().to_string(),
                Slug::new(spec.slug)?,
                spec.title,
                "Admin User",
                now,
            )
            .with_summary(spec.summary)
            .with_content(spec.content)
            .with_image_url(spec.image_url)
            .with_category(spec.category)
            .with_tags(spec.tags.iter().map(|t| t.to_string()).collect());
            if spec.featured {
                article = article.featured();
            }
            article.publish(now);
            article.validate()?;
            Ok(article)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Database, SqliteArticleRepository, SqlitePersonaRepository};

    #[test]
    fn test_builtin_personas_are_valid() {
        let personas = builtin_personas().unwrap();
        assert_eq!(personas.len(), 8);
        assert!(personas.iter().any(|p| p.slug.as_str() == "socrates"));
        assert!(personas.iter().all(|p| p.active));
    }

    #[test]
    fn test_sample_articles_are_published() {
        let articles = sample_articles().unwrap();
        assert_eq!(articles.len(), 3);
        assert!(articles.iter().all(|a| a.published));
        assert!(articles.iter().all(|a| a.published_at.is_some()));
        assert_eq!(articles.iter().filter(|a| a.featured).count(), 1);
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        let personas = SqlitePersonaRepository::new(db.pool());
        let articles = SqliteArticleRepository::new(db.pool());

        let first = load(&personas, &articles).await.unwrap();
        assert_eq!(first.personas_created, 8);
        assert_eq!(first.articles_created, 3);

        let second = load(&personas, &articles).await.unwrap();
        assert_eq!(second, SeedReport::default());
    }
}
