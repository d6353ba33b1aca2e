//! Command bodies of the `pvo` binary.
//!
//! Each command writes its report to any [`Write`] sink, so the same code
//! serves the terminal and tests. API failures have already been shown to
//! the user by the client's [`Notifier`](crate::net::Notifier); commands
//! report them as [`Outcome::Failed`] instead of returning them, and only
//! local I/O errors come back as `Err`.
//!
//! ```rust,no_run
//! use pvo::cli::{self, Outcome};
//! use pvo::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example(client: ApiClient) -> std::io::Result<()> {
//! let storage = Storage::memory();
//! let comics = ComicLibrary::new(
//!     ComicsApi::new(client),
//!     Arc::new(R18ModeStore::new(storage.clone())),
//!     storage,
//! );
//!
//! let outcome = cli::list(&comics, &["desc".into()], &ListParams::new(), &mut std::io::stdout()).await?;
//! if outcome == Outcome::Failed {
//!     std::process::exit(1);
//! }
//! # Ok(())
//! # }
//! ```

use std::io::{self, Write};

use crate::{
    api::{ComicsApi, ListResource},
    library::{Library, LibraryViewExt, SortSettings},
    store::{DisplaySettings, HistoryItem, HistoryStore},
    types::{ItemId, LibraryItem, ListParams, ResourceKind, SortField, SortOrder},
};

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// An API call failed; the user has already been notified.
    Failed,
}

impl Outcome {
    fn and(self, other: Outcome) -> Outcome {
        if self == Outcome::Failed || other == Outcome::Failed {
            Outcome::Failed
        } else {
            Outcome::Done
        }
    }
}

/// Applies `sort_commands` (persisted), fetches and prints the sorted
/// view.
pub async fn list<A, W>(
    library: &Library<A>,
    sort_commands: &[String],
    params: &ListParams,
    out: &mut W,
) -> io::Result<Outcome>
where
    A: ListResource,
    W: Write,
{
    for command in sort_commands {
        library.change_sort(command);
    }

    library.fetch(params).await;
    if library.fetch_error().is_some() {
        return Ok(Outcome::Failed);
    }

    let settings = library.sort_settings();
    writeln!(
        out,
        "{} items, sorted by {} {}",
        library.count(),
        settings.field.as_str(),
        settings.order.as_str()
    )?;
    write_items(out, &library.sorted())?;
    Ok(Outcome::Done)
}

/// Home page summary: counts, recent additions and recent history, as the
/// display settings ask for. Both lists are fetched concurrently.
pub async fn overview<C, S, W>(
    comics: &Library<C>,
    image_sets: &Library<S>,
    settings: &DisplaySettings,
    history: &HistoryStore,
    out: &mut W,
) -> io::Result<Outcome>
where
    C: ListResource,
    S: ListResource,
    W: Write,
{
    let params = ListParams::new();
    futures::future::join(comics.fetch(&params), image_sets.fetch(&params)).await;

    let outcome = fetch_outcome(comics).and(fetch_outcome(image_sets));
    let limit = settings.homepage_section_item_count as usize;

    writeln!(
        out,
        "Comics: {}    Image sets: {}",
        comics.count(),
        image_sets.count()
    )?;

    if settings.show_recently_added {
        let newest = SortSettings {
            field: SortField::AddDate,
            order: SortOrder::Desc,
        };

        writeln!(out, "\nRecently added comics")?;
        write_items(out, &take(comics.filtered().sorted_by(newest), limit))?;
        writeln!(out, "\nRecently added image sets")?;
        write_items(out, &take(image_sets.filtered().sorted_by(newest), limit))?;
    }

    if settings.show_browsing_history {
        writeln!(out, "\nRecently viewed")?;
        write_history(out, &history.get_history(limit))?;
    }
    Ok(outcome)
}

/// Loads a comic, bumps its read count and records it in the history.
pub async fn read<W: Write>(
    api: &ComicsApi,
    history: &HistoryStore,
    id: &ItemId,
    out: &mut W,
) -> io::Result<Outcome> {
    let Ok(comic) = api.get(id).await else {
        return Ok(Outcome::Failed);
    };
    if api.increase_read_frequency(id).await.is_err() {
        return Ok(Outcome::Failed);
    }
    history.add_item(HistoryItem::from_item(ResourceKind::Comic, &comic));

    writeln!(
        out,
        "Reading {} ({} pages)",
        comic.name,
        comic.page_count.unwrap_or(0)
    )?;
    Ok(Outcome::Done)
}

/// One line per item: id, date, name and an R18 marker.
pub fn write_items<T: LibraryItem, W: Write>(out: &mut W, items: &[T]) -> io::Result<()> {
    for item in items {
        let date = item.add_date().get(..10).unwrap_or(item.add_date());
        let flag = if item.is_r18() { " [R18]" } else { "" };
        writeln!(out, "  {:>6}  {}  {}{}", item.id(), date, item.name(), flag)?;
    }
    Ok(())
}

pub fn write_history<W: Write>(out: &mut W, items: &[HistoryItem]) -> io::Result<()> {
    if items.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for item in items {
        let name = item
            .meta
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        writeln!(
            out,
            "  {:<9} {:>6}  {}",
            item.item_type.as_deref().unwrap_or("?"),
            item.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            name
        )?;
    }
    Ok(())
}

fn fetch_outcome<A: ListResource>(library: &Library<A>) -> Outcome {
    match library.fetch_error() {
        Some(_) => Outcome::Failed,
        None => Outcome::Done,
    }
}

fn take<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.truncate(limit);
    items
}
