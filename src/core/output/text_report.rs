//! Plain-text summary report.

use std::io::{self, Write};

use crate::classify::Audience;
use crate::core::probe::ProbeReport;
use crate::core::summary::Summary;
use crate::core::tally::Tally;
use crate::error::Result;

/// Horizontal rule between report sections.
const HLINE: &str = "
********************************************************
";

const BANNER: &str = "
    ┌──────────────────────────────┐
    │   Mastodon archive summary   │
    └──────────────────────────────┘
    ";

/// Writes the summary report in its fixed section order.
pub fn write_text<W: Write>(summary: &Summary, out: &mut W) -> io::Result<()> {
    let outbox = &summary.outbox;
    let likes = &summary.likes;
    let config = &summary.config;

    writeln!(out, "{}", BANNER)?;

    // toots and boosts
    writeln!(out, "total number of toots: {}", outbox.total_records)?;
    writeln!(out, "among them boosts: {}", outbox.reshares)?;
    section_break(out)?;

    heading(out, &format!("most boosted users ({})", config.top_reshared))?;
    ranked_rows(out, &outbox.reshared_actors, config.top_reshared)?;
    writeln!(out, "\nboosted users (total): {}", outbox.reshared_actors.distinct())?;
    section_break(out)?;

    // audience
    writeln!(out, "public posts: {}", outbox.audience.get(&Audience::Public))?;
    writeln!(
        out,
        "followers only posts: {}",
        outbox.audience.get(&Audience::FollowersOnly)
    )?;
    writeln!(out, "direct messages: {}", outbox.audience.get(&Audience::Direct))?;
    section_break(out)?;

    // threads
    writeln!(out, "original toots: {}", outbox.originals)?;
    writeln!(out, "among them orphaned replies: {}", outbox.orphans)?;
    writeln!(out, "replies: {}", outbox.replies())?;
    writeln!(out, "posts with hashtags: {}", outbox.tagged_posts)?;
    section_break(out)?;

    heading(out, &format!("most replied profiles ({})", config.top_replied))?;
    ranked_rows(out, &outbox.replied_actors, config.top_replied)?;
    writeln!(out, "\nreplied users (total): {}", outbox.replied_actors.distinct())?;

    writeln!(out)?;
    heading(
        out,
        &format!(
            "most replied profiles that are no longer available ({})",
            config.top_replied
        ),
    )?;
    ranked_rows(out, &outbox.orphan_plain, config.top_replied)?;
    writeln!(out, "\nreplied users (total): {}", outbox.orphan_plain.distinct())?;

    writeln!(out)?;
    heading(
        out,
        &format!("profiles with broken conversations ({})", config.top_replied),
    )?;
    ranked_rows(out, &outbox.orphan_linked, config.top_replied)?;
    writeln!(out, "\nreplied users (total): {}", outbox.orphan_linked.distinct())?;
    section_break(out)?;

    heading(out, "publishing year")?;
    for (year, n) in outbox.years.sorted_by_key() {
        writeln!(out, "{}: {:>5}", year, n)?;
    }
    section_break(out)?;

    heading(out, &format!("popular hashtags ({})", config.hashtag_rank))?;
    for (tag, n) in outbox.hashtags.at_or_above_rank(config.hashtag_rank) {
        writeln!(out, "{:>4}: {}", n, tag)?;
    }
    writeln!(out, "\nhashtags (total): {}", outbox.hashtags.distinct())?;
    section_break(out)?;

    // likes
    heading(out, "likes")?;
    writeln!(out, "total: {}", likes.total)?;
    writeln!(out, "liked posts by platform:")?;
    for (platform, n) in likes.platforms.all_most_common() {
        writeln!(out, "{:>6}: {}", n, platform)?;
    }
    section_break(out)?;

    heading(
        out,
        &format!("most liked Mastodon profiles ({})", config.top_liked),
    )?;
    ranked_rows(out, &likes.mastodon_actors, config.top_liked)?;
    writeln!(out, "\nliked profiles (total): {}", likes.mastodon_actors.distinct())?;
    section_break(out)?;

    // media
    heading(out, "media attachments")?;
    writeln!(out, "files (total): {}", outbox.media_total())?;
    writeln!(out, "without description: {}", outbox.media_without_description)?;
    writeln!(out, "media files by type:")?;
    for (media_type, n) in outbox.media_types.all_most_common() {
        writeln!(out, "{:>5}: {}", n, media_type)?;
    }
    section_break(out)?;

    if let Some(liveness) = &summary.liveness {
        heading(out, "boosted profiles still available")?;
        probe_section(out, &liveness.reshared, "number of different profiles boosted")?;
        section_break(out)?;

        heading(out, "replied profiles still available")?;
        probe_section(out, &liveness.replied, "number of different profiles checked")?;
        section_break(out)?;
    }

    if !outbox.skipped.is_empty() || likes.skipped > 0 {
        heading(out, "skipped records")?;
        for (reason, n) in outbox.skipped.all_most_common() {
            writeln!(out, "{:>4}: {}", n, reason)?;
        }
        if likes.skipped > 0 {
            writeln!(out, "{:>4}: liked items that are not URLs", likes.skipped)?;
        }
        section_break(out)?;
    }

    Ok(())
}

/// Renders the text report into a string.
///
/// # Errors
///
/// Returns an error if the report cannot be written.
pub fn to_text(summary: &Summary) -> Result<String> {
    let mut buf = Vec::new();
    write_text(summary, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "~".repeat(title.chars().count()))
}

fn section_break<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", HLINE)
}

fn ranked_rows<W: Write>(out: &mut W, tally: &Tally<String>, n: usize) -> io::Result<()> {
    for (key, count) in tally.most_common(n) {
        writeln!(out, "{:>4}: {}", count, key)?;
    }
    Ok(())
}

fn probe_section<W: Write>(out: &mut W, report: &ProbeReport, label: &str) -> io::Result<()> {
    for (url, status) in &report.results {
        writeln!(out, "{} {}", url, status)?;
    }
    writeln!(out, "{}: {} of which are:", label, report.checked())?;
    writeln!(out, "{} available", report.available())?;
    writeln!(out, "{} currently not available", report.not_available())?;
    writeln!(out, "{} no more existing", report.gone())
}
