use chrono::{DateTime, Utc};
use cms_core::{CoverImage, NormalizedArticle, Theme};
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Cover size the listing prefers over the original upload.
pub const COVER_FORMAT: &str = "large";

const CATEGORIES: [&str; 5] = ["Technology", "Business", "Science", "Health", "Culture"];

pub struct PageContext<'a> {
    pub theme: Theme,
    pub articles: &'a [NormalizedArticle],
    pub image_host: &'a str,
    pub fetched_at: DateTime<Utc>,
}

/// Absolute image URL for a cover: the image host followed by the large
/// format path, or the original path when there is no large format.
pub fn cover_src(image_host: &str, cover: &CoverImage) -> String {
    let path = cover.preferred_path(COVER_FORMAT);
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}{}", image_host.trim_end_matches('/'), path)
}

pub fn listing_page(ctx: &PageContext<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=(ctx.theme.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Latest Articles" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                (header(ctx))
                div.layout {
                    aside.sidebar { (sidebar(ctx)) }
                    main {
                        h2 { "Latest Articles" }
                        p.subtitle { "Discover the latest insights and stories" }
                        @if ctx.articles.is_empty() {
                            div.empty-state {
                                p { "No articles found." }
                                p.hint { "Check back later for new content" }
                            }
                        } @else {
                            @for article in ctx.articles {
                                (article_card(article, ctx.image_host))
                            }
                        }
                    }
                }
                footer {
                    "Updated " (ctx.fetched_at.format("%Y-%m-%d %H:%M UTC").to_string())
                }
            }
        }
    }
}

fn header(ctx: &PageContext<'_>) -> Markup {
    let next = ctx.theme.toggle();
    html! {
        header {
            details.mobile-menu {
                summary { "Menu" }
                nav { (sidebar(ctx)) }
            }
            h1 { "Article Feed" }
            form method="post" action="/theme" {
                button type="submit" title={ "Switch to " (next.as_str()) " mode" } {
                    @match ctx.theme {
                        Theme::Light => "☾",
                        Theme::Dark => "☀",
                    }
                }
            }
        }
    }
}

fn sidebar(ctx: &PageContext<'_>) -> Markup {
    html! {
        section.categories {
            h3 { "Categories" }
            ul {
                @for category in CATEGORIES {
                    li { a href="#" { (category) } }
                }
            }
        }
        section.stats {
            h3 { "Platform Stats" }
            p { "Total Articles " strong.total { (ctx.articles.len()) } }
        }
    }
}

fn article_card(article: &NormalizedArticle, image_host: &str) -> Markup {
    html! {
        article.card data-id=(article.id) {
            @if let Some(cover) = &article.cover_image {
                figure.cover {
                    img src=(cover_src(image_host, cover))
                        alt=(cover_alt(article, cover))
                        loading="lazy";
                }
            } @else {
                div.cover-placeholder { "No cover image" }
            }
            div.card-body {
                h3 { (article.title) }
                @if let Some(description) = &article.description {
                    p.description { (description) }
                }
                span.slug { (article.slug) }
            }
        }
    }
}

fn cover_alt<'a>(article: &'a NormalizedArticle, cover: &'a CoverImage) -> &'a str {
    cover
        .alternative_text
        .as_deref()
        .filter(|alt| !alt.is_empty())
        .unwrap_or(article.title.as_str())
}

const STYLES: &str = r#"
:root { --bg: #f8fafc; --fg: #111827; --card: #ffffff; --muted: #6b7280; --accent: #2563eb; }
html.dark { --bg: #0f172a; --fg: #f9fafb; --card: #1e293b; --muted: #9ca3af; --accent: #60a5fa; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg); }
header { display: flex; align-items: center; gap: 1rem; padding: 1rem 1.5rem; background: var(--card); position: sticky; top: 0; }
header h1 { flex: 1; font-size: 1.25rem; margin: 0; }
header button { background: none; border: none; font-size: 1.25rem; color: var(--fg); cursor: pointer; }
.layout { display: grid; grid-template-columns: 16rem 1fr; gap: 2rem; padding: 2rem 1.5rem; }
.sidebar section { background: var(--card); border-radius: 1rem; padding: 1rem 1.5rem; margin-bottom: 1.5rem; }
.sidebar ul { list-style: none; padding: 0; }
.sidebar a { color: var(--fg); text-decoration: none; }
.mobile-menu { display: none; }
.card { background: var(--card); border-radius: 1rem; overflow: hidden; margin-bottom: 1.5rem; }
.cover { margin: 0; }
.cover img { width: 100%; height: 16rem; object-fit: cover; display: block; }
.cover-placeholder { height: 6rem; display: flex; align-items: center; justify-content: center; color: var(--muted); }
.card-body { padding: 1rem 1.5rem; }
.slug { font-size: 0.75rem; color: var(--accent); }
.subtitle, .hint, .description, footer { color: var(--muted); }
.empty-state { text-align: center; padding: 4rem 0; }
footer { padding: 1rem 1.5rem; font-size: 0.75rem; }
@media (max-width: 1024px) {
  .layout { grid-template-columns: 1fr; }
  .sidebar { display: none; }
  .mobile-menu { display: block; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(value: serde_json::Value) -> NormalizedArticle {
        NormalizedArticle::from(serde_json::from_value::<cms_core::RawArticleRecord>(value).unwrap())
    }

    fn render(theme: Theme, articles: &[NormalizedArticle]) -> String {
        listing_page(&PageContext {
            theme,
            articles,
            image_host: "http://images.local:1337",
            fetched_at: Utc::now(),
        })
        .into_string()
    }

    #[test]
    fn test_cover_src_prefers_large_format() {
        let a = article(json!({
            "id": 1, "title": "T", "description": "D", "slug": "t",
            "cover": { "url": "/a.jpg", "formats": { "large": { "url": "/a-large.jpg" } } }
        }));
        let cover = a.cover_image.as_ref().unwrap();
        assert_eq!(cover_src("http://images.local:1337", cover), "http://images.local:1337/a-large.jpg");
        assert_eq!(cover_src("http://images.local:1337/", cover), "http://images.local:1337/a-large.jpg");
    }

    #[test]
    fn test_cover_src_falls_back_to_url() {
        let a = article(json!({
            "id": 1, "title": "T", "description": "D", "slug": "t",
            "cover": { "url": "/a.jpg", "formats": { "small": { "url": "/a-small.jpg" } } }
        }));
        assert_eq!(cover_src("http://h", a.cover_image.as_ref().unwrap()), "http://h/a.jpg");
    }

    #[test]
    fn test_cover_src_keeps_absolute_urls() {
        let a = article(json!({
            "id": 1, "title": "T", "description": "D", "slug": "t",
            "cover": { "url": "https://cdn.example.com/a.jpg" }
        }));
        assert_eq!(cover_src("http://h", a.cover_image.as_ref().unwrap()), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_empty_state() {
        let page = render(Theme::Light, &[]);
        assert!(page.contains("No articles found."));
        assert!(page.contains(r#"<html lang="en" class="light">"#));
    }

    #[test]
    fn test_article_cards() {
        let articles = vec![
            article(json!({
                "id": 1, "title": "With cover", "description": "First", "slug": "with-cover",
                "cover": { "url": "/a.jpg", "alternativeText": "A lake" }
            })),
            article(json!({ "id": 2, "title": "No cover", "description": null, "slug": "no-cover" })),
        ];
        let page = render(Theme::Dark, &articles);

        assert!(page.contains(r#"class="dark""#));
        assert!(page.contains(r#"src="http://images.local:1337/a.jpg""#));
        assert!(page.contains(r#"alt="A lake""#));
        assert!(page.contains("No cover image"));
        assert!(!page.contains("No articles found."));
        assert!(page.find("With cover").unwrap() < page.find("No cover").unwrap());
        assert!(page.contains("Switch to light mode"));
    }

    #[test]
    fn test_alt_falls_back_to_title() {
        let articles = vec![article(json!({
            "id": 1, "title": "Fallback", "description": "D", "slug": "f",
            "cover": { "url": "/a.jpg", "alternativeText": "" }
        }))];
        assert!(render(Theme::Light, &articles).contains(r#"alt="Fallback""#));
    }

    #[test]
    fn test_escapes_cms_content() {
        let articles = vec![article(json!({
            "id": 1, "title": "<script>alert(1)</script>", "description": "D", "slug": "x"
        }))];
        let page = render(Theme::Light, &articles);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
