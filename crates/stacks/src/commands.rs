//! Command parsing and handling.
//!
//! Four commands are exposed, all taking positional arguments:
//!
//! | command    | arguments              | effect                               |
//! |------------|------------------------|--------------------------------------|
//! | `stack`    | (none)                 | show the held item's stack size      |
//! | `stack`    | `<size>`               | set the held item's stack size       |
//! | `stack`    | `<item>`               | show an item's stack size            |
//! | `stack`    | `search <text>`        | search identifiers                   |
//! | `stack`    | `<item> <size>`        | set an item's stack size             |
//! | `stcat`    | (none)                 | list categories                      |
//! | `stcat`    | `<category>`           | list items in a category             |
//! | `stcat`    | `<category> <size>`    | set every item in a category         |
//! | `stimport` |                        | import the interchange document      |
//! | `stexport` |                        | export the interchange document      |
//!
//! Handlers never fail: every outcome, including errors, is a [`Response`].

use stacks_core::{Category, ItemId, StackSize};
use stacks_perms::{Actor, Permissions};
use stacks_store::Store;

use crate::controller::StackController;
use crate::error::StacksError;
use crate::messages::{MessageKey, Response};
use crate::registry::Registry;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `stack`
    ShowHeld,
    /// `stack <size>` with a positive size
    SetHeld(StackSize),
    /// `stack <item>`
    Show(ItemId),
    /// `stack search <text>`
    Search(String),
    /// `stack <item> <size>`; the size is validated when handled
    Set { item: ItemId, size: String },
    /// `stack` with too many arguments
    StackHelp,
    /// `stcat`
    ListCategories,
    /// `stcat <category>`
    ListItems(Category),
    /// `stcat <category> <size>`; the size is validated when handled
    SetCategory { category: Category, size: String },
    /// `stimport`
    Import,
    /// `stexport`
    Export,
}

impl Command {
    /// Parse a command name and its arguments. Returns `None` for names that
    /// are not Stacks commands.
    pub fn parse<A: AsRef<str>>(name: &str, args: &[A]) -> Option<Self> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let name = name.trim_start_matches('/');

        if name.eq_ignore_ascii_case("stack") {
            Some(Self::parse_stack(&args))
        } else if name.eq_ignore_ascii_case("stcat") {
            Some(Self::parse_stcat(&args))
        } else if name.eq_ignore_ascii_case("stimport") {
            Some(Command::Import)
        } else if name.eq_ignore_ascii_case("stexport") {
            Some(Command::Export)
        } else {
            None
        }
    }

    fn parse_stack(args: &[&str]) -> Self {
        match args {
            [] => Command::ShowHeld,
            // A non-positive number falls through to a lookup by name.
            [single] => match StackSize::parse(single) {
                Ok(size) => Command::SetHeld(size),
                Err(_) => Command::Show(ItemId::normalize(single)),
            },
            ["search", needle] => Command::Search((*needle).to_string()),
            [item, size] => Command::Set {
                item: ItemId::normalize(item),
                size: (*size).to_string(),
            },
            _ => Command::StackHelp,
        }
    }

    fn parse_stcat(args: &[&str]) -> Self {
        let category = |raw: &str| Category::new(raw.trim().to_lowercase());
        match args {
            [] => Command::ListCategories,
            [name] => Command::ListItems(category(*name)),
            [name, size] => Command::SetCategory {
                category: category(*name),
                size: (*size).to_string(),
            },
            _ => Command::ListCategories,
        }
    }
}

/// Parse, authorize and run a command.
///
/// Returns `None` if `name` is not a Stacks command.
pub fn dispatch<R, S, P, A>(
    controller: &mut StackController<R, S, P>,
    actor: &Actor,
    name: &str,
    args: &[A],
) -> Option<Response>
where
    R: Registry,
    S: Store,
    P: Permissions,
    A: AsRef<str>,
{
    let command = Command::parse(name, args)?;
    Some(execute(controller, actor, &command))
}

/// Authorize and run a parsed command.
pub fn execute<R, S, P>(
    controller: &mut StackController<R, S, P>,
    actor: &Actor,
    command: &Command,
) -> Response
where
    R: Registry,
    S: Store,
    P: Permissions,
{
    if controller.authorize(actor).is_err() {
        return Response::new(MessageKey::NotAuthorized);
    }

    tracing::debug!(%actor, ?command, "handling command");

    match command {
        Command::ShowHeld => match controller.held_item(actor) {
            Ok(id) => show(controller, &id),
            Err(_) => Response::new(MessageKey::HelpText1),
        },
        Command::SetHeld(size) => match controller.held_item(actor) {
            Ok(id) => set(controller, &id, *size),
            Err(_) => Response::new(MessageKey::HelpText1),
        },
        Command::Show(id) => show(controller, id),
        Command::Search(needle) => search(controller, needle),
        Command::Set { item, size } => match StackSize::parse(size) {
            Ok(size) => set(controller, item, size),
            Err(e) => {
                tracing::debug!(item = %item, error = %e, "not a valid stack size, showing current");
                show(controller, item)
            }
        },
        Command::StackHelp => Response::new(MessageKey::HelpText1),
        Command::ListCategories => list_categories(controller),
        Command::ListItems(category) => list_items(controller, category),
        Command::SetCategory { category, size } => {
            if !controller.index().has_category(category) {
                return Response::new(MessageKey::InvalidC).arg(category);
            }
            match StackSize::parse(size) {
                Ok(size) => set_category(controller, category, size),
                Err(e) => {
                    tracing::debug!(%category, error = %e, "not a valid stack size, listing items");
                    list_items(controller, category)
                }
            }
        }
        Command::Import => match controller.import() {
            Ok(count) => Response::new(MessageKey::Imported).arg(count),
            Err(_) => Response::new(MessageKey::ImportFail),
        },
        Command::Export => match controller.export() {
            Ok(count) => Response::new(MessageKey::Exported).arg(count),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                Response::new(MessageKey::Exported).arg(0)
            }
        },
    }
}

fn show<R: Registry, S: Store, P: Permissions>(
    controller: &StackController<R, S, P>,
    id: &ItemId,
) -> Response {
    match controller.stack_size(id) {
        Ok(size) => Response::new(MessageKey::Current).arg(id).arg(size),
        Err(_) => Response::new(MessageKey::Invalid).arg(id),
    }
}

fn set<R: Registry, S: Store, P: Permissions>(
    controller: &mut StackController<R, S, P>,
    id: &ItemId,
    size: StackSize,
) -> Response {
    match controller.set_stack_size(id, size) {
        Ok(_) => Response::new(MessageKey::StackSet).arg(id).arg(size),
        Err(StacksError::TooLarge { requested, max }) => {
            Response::new(MessageKey::TooLarge).arg(requested).arg(max)
        }
        Err(_) => Response::new(MessageKey::Invalid).arg(id),
    }
}

fn search<R: Registry, S: Store, P: Permissions>(
    controller: &StackController<R, S, P>,
    needle: &str,
) -> Response {
    let hits = controller.search(needle);
    let list: String = hits
        .iter()
        .map(|hit| format!("\t[{}] {} ({})\n", hit.category, hit.id, hit.stack_size))
        .collect();
    Response::new(MessageKey::Found).arg(hits.len()).arg(list)
}

fn list_categories<R: Registry, S: Store, P: Permissions>(
    controller: &StackController<R, S, P>,
) -> Response {
    let categories = controller.categories();
    if categories.is_empty() {
        return Response::new(MessageKey::None);
    }
    let names: Vec<String> = categories
        .iter()
        .map(ToString::to_string)
        .collect();
    Response::new(MessageKey::HelpText2).arg(format!("\t{}\n", names.join("\n\t")))
}

fn list_items<R: Registry, S: Store, P: Permissions>(
    controller: &StackController<R, S, P>,
    category: &Category,
) -> Response {
    match controller.items_in(category) {
        Ok(items) => {
            let list: String = items
                .iter()
                .map(|(id, size)| format!("\t{id}: {size}\n"))
                .collect();
            Response::new(MessageKey::ItemList).arg(category).arg(list)
        }
        Err(_) => Response::new(MessageKey::InvalidC).arg(category),
    }
}

fn set_category<R: Registry, S: Store, P: Permissions>(
    controller: &mut StackController<R, S, P>,
    category: &Category,
    size: StackSize,
) -> Response {
    match controller.set_category_stack_size(category, size) {
        Ok(_) => Response::new(MessageKey::CatStack).arg(category).arg(size),
        Err(StacksError::TooLarge { requested, max }) => {
            Response::new(MessageKey::TooLarge).arg(requested).arg(max)
        }
        Err(_) => Response::new(MessageKey::InvalidC).arg(category),
    }
}
