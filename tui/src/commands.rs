//! Headless subcommands
//!
//! Each runner writes plain text (or JSON) to the given writer so the same
//! code serves the binary and the tests.

use std::io::Write;

use anyhow::{bail, Context};

use terminalx_conductor::blog::{BlogClient, MediaKind, Page, Post, PostDraft, PostFilter};
use terminalx_conductor::movies::{
    details_notice, format_rating, listing_notice, MovieCatalog, MovieDetails, MoviePage,
};
use terminalx_conductor::{Sender, SurfaceType, TerminalConfig};

use crate::cli::{BlogCommand, MoviesCommand, PostArgs, PostUpdateArgs};
use crate::conductor_client::ConductorClient;

/// Column width for wrapped prose
const TEXT_WIDTH: usize = 78;

// ============================================================================
// ask
// ============================================================================

/// Run one exchange and print it from the operator line onward
pub async fn run_ask(
    client: &mut ConductorClient,
    message: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if message.trim().is_empty() {
        bail!("nothing to send");
    }

    client.connect(SurfaceType::Headless).await?;
    let before = client.session().transcript().len();
    client.submit(message).await?;
    client.run_until_idle().await;
    client.recv_all();

    // CLEAR replaces the transcript, so fall back to printing all of it
    let transcript = client.session().transcript();
    let start = if transcript.len() > before { before } else { 0 };
    for entry in &transcript[start..] {
        match entry.sender {
            Sender::User => writeln!(out, "> {}", entry.text)?,
            Sender::System | Sender::Ai => writeln!(out, "{}", entry.text)?,
        }
    }
    Ok(())
}

// ============================================================================
// movies
// ============================================================================

/// Run a `movies` subcommand
pub async fn run_movies(
    config: &TerminalConfig,
    command: &MoviesCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = MovieCatalog::from_config(&config.movies, config.api.timeout())?;

    match command {
        MoviesCommand::Top { page, search, json } => {
            let resolved = catalog.top_rated(*page).await;
            let notice = listing_notice(&resolved);
            let listing = resolved.into_value();
            if *json {
                write_listing_json(&listing, search.as_deref(), out)?;
            } else {
                write_listing(&listing, search.as_deref(), notice, out)?;
            }
        }
        MoviesCommand::Show { id, json } => {
            let resolved = catalog.movie_details(*id).await;
            let notice = details_notice(&resolved);
            let details = resolved.into_value();
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&details)?)?;
            } else {
                write_details(&details, notice, out)?;
            }
        }
    }
    Ok(())
}

fn write_listing_json(
    listing: &MoviePage,
    search: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let json = match search {
        Some(query) => serde_json::to_string_pretty(&listing.search(query))?,
        None => serde_json::to_string_pretty(listing)?,
    };
    writeln!(out, "{json}")?;
    Ok(())
}

/// Text listing of one page of movies
pub fn write_listing(
    listing: &MoviePage,
    search: Option<&str>,
    notice: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(notice) = notice {
        writeln!(out, "{notice}")?;
    }
    writeln!(
        out,
        "TOP RATED MOVIES - PAGE {}/{}",
        listing.page,
        listing.navigable_pages()
    )?;

    let movies = match search {
        Some(query) => listing.search(query),
        None => listing.results.iter().collect(),
    };
    if movies.is_empty() {
        writeln!(out, "NO MOVIES FOUND")?;
    }
    for movie in movies {
        writeln!(
            out,
            "[{:>7}] {} ({}) {}",
            movie.id,
            movie.title.to_uppercase(),
            movie.year().unwrap_or("N/A"),
            format_rating(movie.vote_average)
        )?;
    }
    Ok(())
}

/// Text record of one movie
pub fn write_details(
    details: &MovieDetails,
    notice: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(notice) = notice {
        writeln!(out, "{notice}")?;
    }
    writeln!(out, "{}", details.title.to_uppercase())?;

    let mut facts = vec![details.year().unwrap_or("N/A").to_string()];
    if let Some(runtime) = details.runtime_label() {
        facts.push(runtime);
    }
    facts.push(format!("RATING: {}", format_rating(details.vote_average)));
    writeln!(out, "{}", facts.join(" | "))?;

    let genres = details.genre_line();
    if !genres.is_empty() {
        writeln!(out, "GENRES: {}", genres.to_uppercase())?;
    }

    writeln!(out)?;
    for line in textwrap::wrap(&details.overview, TEXT_WIDTH) {
        writeln!(out, "{line}")?;
    }

    let cast = details.top_cast();
    if !cast.is_empty() {
        writeln!(out)?;
        writeln!(out, "CAST:")?;
        for member in cast {
            match &member.character {
                Some(role) if !role.is_empty() => {
                    writeln!(out, "  {} AS {}", member.name.to_uppercase(), role.to_uppercase())?;
                }
                _ => writeln!(out, "  {}", member.name.to_uppercase())?,
            }
        }
    }

    if let Some(key) = details.trailer_key() {
        writeln!(out, "TRAILER: https://www.youtube.com/watch?v={key}")?;
    }
    if let Some(poster) = details.poster_url() {
        writeln!(out, "POSTER: {poster}")?;
    }
    Ok(())
}

// ============================================================================
// blog
// ============================================================================

/// Run a `blog` subcommand
pub async fn run_blog(
    config: &TerminalConfig,
    command: &BlogCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let client = BlogClient::new(&config.api)?;

    match command {
        BlogCommand::List {
            tag,
            category,
            search,
            page,
        } => {
            let filter = PostFilter {
                tag: tag.clone(),
                category: category.clone(),
                search: search.clone(),
            };
            let page = client
                .browse(&filter, *page)
                .await
                .context("failed to fetch posts")?;
            write_post_page(&page, out)?;
        }
        BlogCommand::Show { id } => {
            let post = client
                .get_post(id)
                .await
                .with_context(|| format!("failed to fetch post {id}"))?;
            write_post(&post, out)?;
        }
        BlogCommand::Tags => {
            for tag in client.tags().await.context("failed to fetch tags")? {
                writeln!(out, "{tag}")?;
            }
        }
        BlogCommand::Categories => {
            for category in client
                .categories()
                .await
                .context("failed to fetch categories")?
            {
                writeln!(out, "{category}")?;
            }
        }
        BlogCommand::Create(args) => {
            let draft = draft_from_args(args)?;
            let post = client
                .create_post(&draft)
                .await
                .context("failed to create post")?;
            writeln!(out, "POST CREATED: {}", post.id)?;
        }
        BlogCommand::Update { id, fields } => {
            let stored = client
                .get_post(id)
                .await
                .with_context(|| format!("failed to fetch post {id}"))?;
            let draft = merge_update(&stored, fields)?;
            let post = client
                .update_post(id, &draft)
                .await
                .with_context(|| format!("failed to update post {id}"))?;
            writeln!(out, "POST UPDATED: {}", post.id)?;
        }
        BlogCommand::Delete { id } => {
            client
                .delete_post(id)
                .await
                .with_context(|| format!("failed to delete post {id}"))?;
            writeln!(out, "POST DELETED: {id}")?;
        }
    }
    Ok(())
}

fn draft_from_args(args: &PostArgs) -> anyhow::Result<PostDraft> {
    PostDraft::new(&args.title, &args.content, &args.tags, args.category)
        .map_err(anyhow::Error::msg)
}

/// Stored post with the given fields replaced
pub fn merge_update(stored: &Post, fields: &PostUpdateArgs) -> anyhow::Result<PostDraft> {
    let base = PostDraft::from_post(stored)
        .with_context(|| format!("post {} has unknown category {:?}", stored.id, stored.category))?;

    let title = fields.title.as_deref().unwrap_or(&base.title);
    let content = fields.content.as_deref().unwrap_or(&base.content);
    let tags = fields
        .tags
        .clone()
        .unwrap_or_else(|| base.tags.join(","));
    let category = fields.category.unwrap_or(base.category);

    Ok(PostDraft::new(title, content, &tags, category)
        .map_err(anyhow::Error::msg)?
        .with_media(base.media))
}

/// One page of post summaries
pub fn write_post_page(page: &Page<Post>, out: &mut impl Write) -> anyhow::Result<()> {
    if page.items.is_empty() {
        writeln!(out, "NO POSTS FOUND")?;
        return Ok(());
    }
    for post in &page.items {
        writeln!(out, "[{}] {}", post.id, post.title.to_uppercase())?;
        writeln!(
            out,
            "    {} | {} | TAGS: {}",
            post.timestamp(),
            post.category,
            post.tags.join(", ")
        )?;
    }
    writeln!(
        out,
        "PAGE {}/{} ({} POSTS)",
        page.number,
        page.total_pages.max(1),
        page.total_items
    )?;
    Ok(())
}

/// Full post
pub fn write_post(post: &Post, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", post.title.to_uppercase())?;
    writeln!(out, "{} | {}", post.timestamp(), post.category)?;
    if !post.tags.is_empty() {
        writeln!(out, "TAGS: {}", post.tags.join(", "))?;
    }
    writeln!(out)?;
    for paragraph in post.paragraphs() {
        for line in textwrap::wrap(paragraph, TEXT_WIDTH) {
            writeln!(out, "{line}")?;
        }
    }
    for media in &post.media {
        let kind = match media.kind {
            MediaKind::Image => "IMAGE",
            MediaKind::Video => "VIDEO",
        };
        match &media.caption {
            Some(caption) => writeln!(out, "[{kind}] {} - {caption}", media.url)?,
            None => writeln!(out, "[{kind}] {}", media.url)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use terminalx_conductor::blog::{paginate, Category, POSTS_PER_PAGE};
    use terminalx_conductor::movies::Movie;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn post(id: &str, category: &str) -> Post {
        Post {
            id: id.to_string(),
            title: "Hello".to_string(),
            content: "one\ntwo".to_string(),
            tags: vec!["RETRO".to_string()],
            category: category.to_string(),
            media: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_listing_with_notice_and_search() {
        let listing = MoviePage {
            page: 1,
            results: vec![
                Movie {
                    id: 278,
                    title: "The Shawshank Redemption".into(),
                    poster_path: None,
                    release_date: Some("1994-09-23".into()),
                    vote_average: 8.7,
                },
                Movie {
                    id: 238,
                    title: "The Godfather".into(),
                    poster_path: None,
                    release_date: None,
                    vote_average: 8.69,
                },
            ],
            total_pages: 500,
            total_results: 10_000,
        };

        let text = output(|out| write_listing(&listing, Some("godfather"), Some("OFFLINE"), out));
        assert_eq!(
            text,
            "OFFLINE\nTOP RATED MOVIES - PAGE 1/13\n[    238] THE GODFATHER (N/A) 8.7/10\n"
        );
    }

    #[test]
    fn test_post_page_footer() {
        let posts = vec![post("a", "RETRO"), post("b", "AI")];
        let page = paginate(&posts, 1, POSTS_PER_PAGE);
        let text = output(|out| write_post_page(&page, out));
        assert!(text.contains("[a] HELLO"));
        assert!(text.ends_with("PAGE 1/1 (2 POSTS)\n"));

        let empty = paginate::<Post>(&[], 1, POSTS_PER_PAGE);
        assert_eq!(output(|out| write_post_page(&empty, out)), "NO POSTS FOUND\n");
    }

    #[test]
    fn test_merge_update_keeps_unset_fields() {
        let stored = post("a", "RETRO");
        let fields = PostUpdateArgs {
            title: Some("New title".into()),
            content: None,
            tags: None,
            category: Some(Category::Ai),
        };
        let draft = merge_update(&stored, &fields).unwrap();
        assert_eq!(draft.title, "New title");
        assert_eq!(draft.content, "one\ntwo");
        assert_eq!(draft.tags, vec!["RETRO"]);
        assert_eq!(draft.category, Category::Ai);

        assert!(merge_update(&post("b", "COOKING"), &fields).is_err());
    }
}
