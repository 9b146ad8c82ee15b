//! Synthetic archive generator for stress testing tootpack.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [records] [output_dir]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_archive

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

const PUBLIC: &str = "https://www.w3.org/ns/activitystreams#Public";
const ME: &str = "https://example.social/users/me";

const INSTANCES: &[&str] = &[
    "mastodon.social",
    "fosstodon.org",
    "chaos.social",
    "hachyderm.io",
    "defunct.example",
];

const USERS: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "иван", "村上",
];

const HASHTAGS: &[&str] = &[
    "#rust", "#Rust", "#fediverse", "#mastodon", "#photography", "#caturday", "#foss", "#linux",
];

const MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "video/mp4",
    "audio/mpeg",
    "application/pdf",
];

/// Liked URL shapes, one per origin platform.
const LIKE_SHAPES: &[&str] = &[
    "https://{host}/users/{user}/statuses/{n}",
    "https://{host}/p/{user}/{n}",
    "https://{host}/objects/{n}",
    "https://{host}/item/{n}",
    "https://{host}/videos/watch/{n}",
    "https://{host}/notes/{n}",
    "tag:{host},2019-01-01:objectId={n}:objectType=Status",
    "https://{host}/@{user}/{n}",
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_archive");

    println!("🧪 Archive Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Records: {}", count);
    println!("   Output:  {}", output);
    println!();

    let dir = Path::new(output);
    fs::create_dir_all(dir)?;

    let mut rng = rand::thread_rng();
    let start = Instant::now();

    let outbox_bytes = write_collection(&dir.join("outbox.json"), count, |i| {
        generate_activity(&mut rng, i)
    })?;
    let likes_bytes = write_collection(&dir.join("likes.json"), count / 2, |i| {
        generate_like(&mut rng, i)
    })?;

    let elapsed = start.elapsed();
    let mb = (outbox_bytes + likes_bytes) as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} records/s",
        count as f64 / elapsed.as_secs_f64()
    );

    Ok(())
}

/// Streams an `OrderedCollection` to disk, one item at a time.
fn write_collection(
    path: &Path,
    count: usize,
    mut item: impl FnMut(usize) -> Value,
) -> io::Result<usize> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer
    let start = Instant::now();
    let mut bytes_written: usize = 0;

    writeln!(writer, "{{")?;
    writeln!(writer, "  \"type\": \"OrderedCollection\",")?;
    writeln!(writer, "  \"totalItems\": {},", count)?;
    writeln!(writer, "  \"orderedItems\": [")?;

    for i in 0..count {
        let comma = if i + 1 < count { "," } else { "" };
        let line = format!("    {}{}", item(i), comma);

        bytes_written += line.len();
        writeln!(writer, "{}", line)?;

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   {}: {}/{} ({:.1} MB, {:.0} rec/s)",
                path.display(),
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writeln!(writer, "  ]")?;
    writeln!(writer, "}}")?;
    writer.flush()?;

    Ok(bytes_written)
}

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn actor(rng: &mut impl Rng) -> String {
    format!("https://{}/users/{}", pick(rng, INSTANCES), pick(rng, USERS))
}

fn timestamp(rng: &mut impl Rng) -> String {
    format!(
        "{}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        rng.gen_range(2017..=2024),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60)
    )
}

fn generate_activity(rng: &mut impl Rng, index: usize) -> Value {
    match index % 20 {
        // Boosts
        0..=5 => {
            let boosted = actor(rng);
            json!({
                "type": "Announce",
                "published": timestamp(rng),
                "to": [PUBLIC],
                "cc": [boosted, format!("{}/followers", ME)],
                "object": format!("{}/statuses/{}", boosted, index),
            })
        }

        // Broken records, to exercise the skip paths
        6 => json!({"type": "Create", "object": {"content": "<p>no audience</p>"}}),
        7 => json!({"type": "Like", "object": "https://x.example/1"}),
        8 => json!(["not", "an", "activity"]),

        // Posts
        _ => generate_post(rng, index),
    }
}

fn generate_post(rng: &mut impl Rng, index: usize) -> Value {
    let to = match rng.gen_range(0..10) {
        0..=5 => PUBLIC.to_string(),
        6..=8 => format!("{}/followers", ME),
        _ => actor(rng),
    };

    let (content, in_reply_to) = match index % 7 {
        0 => {
            let parent = actor(rng);
            (
                format!("<p>@{} sure, why not</p>", pick(rng, USERS)),
                Some(format!("{}/statuses/{}", parent, index)),
            )
        }
        // orphaned reply, plain mention
        1 => (format!("<p>@{} are you still there?</p>", pick(rng, USERS)), None),
        // orphaned reply, linked mention
        2 => {
            let user = pick(rng, USERS);
            let host = pick(rng, INSTANCES);
            (
                format!(
                    "<p><span class=\"h-card\"><a href=\"https://{}/@{}\" class=\"u-url mention\">@<span>{}</span></a></span> hello</p>",
                    host, user, user
                ),
                None,
            )
        }
        _ => (format!("<p>Post number {} with &lt;escaped&gt; text</p>", index), None),
    };

    let tags: Vec<Value> = (0..rng.gen_range(0..4))
        .map(|_| json!({"type": "Hashtag", "name": pick(rng, HASHTAGS)}))
        .collect();

    let attachments: Vec<Value> = (0..rng.gen_range(0..3))
        .map(|n| {
            let media_type = pick(rng, MEDIA_TYPES);
            let name = if rng.gen_bool(0.3) {
                Value::Null
            } else {
                json!(format!("description {}", n))
            };
            json!({
                "type": "Document",
                "mediaType": media_type,
                "url": format!("/media_attachments/files/{}/{}.bin", index, n),
                "name": name,
            })
        })
        .collect();

    let published = timestamp(rng);
    json!({
        "type": "Create",
        "published": published,
        "object": {
            "id": format!("{}/statuses/{}", ME, index),
            "type": "Note",
            "to": [to],
            "inReplyTo": in_reply_to,
            "published": published,
            "content": content,
            "tag": tags,
            "attachment": attachments,
        }
    })
}

fn generate_like(rng: &mut impl Rng, index: usize) -> Value {
    let url = pick(rng, LIKE_SHAPES)
        .replace("{host}", pick(rng, INSTANCES))
        .replace("{user}", pick(rng, USERS))
        .replace("{n}", &index.to_string());
    Value::String(url)
}
