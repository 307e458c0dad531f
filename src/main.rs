//! CLI shim for opsdeck.
//!
//! Parses arguments, initializes tracing, hydrates the app context (phase
//! one), then dispatches exactly one command (phase two). All interesting
//! behavior lives in the library; this file only translates between argv and
//! the application layer.

use std::io::Write;
use std::process::ExitCode;

use opsdeck::app::{
    dashboard, posts, AppContext, SortField, TodoFilter, TodoSortField, TodosViewState,
    UsersViewState,
};
use opsdeck::domain::{OpsdeckError, Result, UserPatch};
use opsdeck::infrastructure::default_data_dir;
use opsdeck::observability::init_tracing;
use opsdeck::storage::Theme;
use opsdeck::Config;

const USAGE: &str = "usage: opsdeck <command>

commands:
  login <email> <password>        start an authenticated session
  logout                          clear the session
  whoami                          show the current session
  theme [light|dark|system]       show or set the theme preference
  users list [sort <column>] [search <query>]
  users create <name> <username> <email> [phone] [website]
  users update <id> <field>=<value>...
  users delete <id> [--yes]
  users reset                     re-fetch the collection from the API
  posts list [user <id>]          browse posts, optionally by author
  posts show <id>                 one post in full
  todos list [all|completed|pending] [sort <column>]
  dashboard                       derived stats over users, posts, todos";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("opsdeck: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.trace_level.as_deref());

    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("opsdeck: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<Config> {
    let path = std::env::var("OPSDECK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_data_dir().join("config.toml"));
    Config::load(path)
}

fn run(config: &Config, args: &[String]) -> Result<()> {
    let mut ctx = AppContext::initialize(config)?;

    let result = dispatch(&mut ctx, args);
    ctx.flush()?;
    result
}

fn dispatch(ctx: &mut AppContext, args: &[String]) -> Result<()> {
    match args[0].as_str() {
        "login" => cmd_login(ctx, args.get(1), args.get(2)),
        "logout" => {
            ctx.session.logout()?;
            println!("Logged out.");
            Ok(())
        }
        "whoami" => cmd_whoami(ctx),
        "theme" => cmd_theme(ctx, args.get(1)),
        "users" => {
            require_auth(ctx)?;
            cmd_users(ctx, &args[1..])
        }
        "posts" => {
            require_auth(ctx)?;
            cmd_posts(ctx, &args[1..])
        }
        "todos" => {
            require_auth(ctx)?;
            cmd_todos(ctx, &args[1..])
        }
        "dashboard" => {
            require_auth(ctx)?;
            cmd_dashboard(ctx)
        }
        other => Err(OpsdeckError::Validation(format!(
            "unknown command `{other}`\n\n{USAGE}"
        ))),
    }
}

fn require_auth(ctx: &AppContext) -> Result<()> {
    if ctx.session.is_authenticated() {
        Ok(())
    } else {
        Err(OpsdeckError::Validation(
            "not logged in (run `opsdeck login <email> <password>`)".to_string(),
        ))
    }
}

fn cmd_login(ctx: &mut AppContext, email: Option<&String>, password: Option<&String>) -> Result<()> {
    let email = email.map(String::as_str).unwrap_or("");
    let password = password.map(String::as_str).unwrap_or("");

    // Validation failure is an inline message, not an error exit.
    if ctx.session.login(email, password)? {
        let name = ctx
            .session
            .session()
            .user
            .as_ref()
            .map_or_else(String::new, |identity| identity.name.clone());
        println!("Welcome, {name}.");
    } else {
        println!("Email and password are required.");
    }
    Ok(())
}

fn cmd_whoami(ctx: &AppContext) -> Result<()> {
    match &ctx.session.session().user {
        Some(identity) => println!("{} <{}>", identity.name, identity.email),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn cmd_theme(ctx: &mut AppContext, name: Option<&String>) -> Result<()> {
    if let Some(name) = name {
        ctx.theme.set_theme(Theme::from_name(name))?;
    }
    println!("{}", ctx.theme.theme());
    Ok(())
}

fn cmd_users(ctx: &mut AppContext, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("list") | None => cmd_users_list(ctx, args.get(1..).unwrap_or(&[])),
        Some("create") => cmd_users_create(ctx, &args[1..]),
        Some("update") => cmd_users_update(ctx, &args[1..]),
        Some("delete") => cmd_users_delete(ctx, &args[1..]),
        Some("reset") => {
            ctx.users.reset()?;
            println!("{} users", ctx.users.store().records().len());
            Ok(())
        }
        Some(other) => Err(OpsdeckError::Validation(format!(
            "unknown users subcommand `{other}`\n\n{USAGE}"
        ))),
    }
}

fn cmd_users_list(ctx: &mut AppContext, args: &[String]) -> Result<()> {
    ctx.users.load()?;

    let mut view = UsersViewState::default();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "sort" => {
                let column = args.next().ok_or_else(|| {
                    OpsdeckError::Validation("sort requires a column name".to_string())
                })?;
                let field = SortField::from_name(column).ok_or_else(|| {
                    OpsdeckError::Validation(format!("unknown column `{column}`"))
                })?;
                view.toggle_sort(field);
            }
            "search" => {
                let query = args.next().ok_or_else(|| {
                    OpsdeckError::Validation("search requires a query".to_string())
                })?;
                view.set_search_query(query.as_str());
            }
            other => {
                return Err(OpsdeckError::Validation(format!("unknown option `{other}`")));
            }
        }
    }

    for user in view.projection(ctx.users.store().records()) {
        println!(
            "{:>4}  {:<24} {:<16} {:<28} {}",
            user.id,
            user.name,
            user.username,
            user.email,
            user.phone.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn cmd_users_create(ctx: &mut AppContext, args: &[String]) -> Result<()> {
    let [name, username, email, rest @ ..] = args else {
        return Err(OpsdeckError::Validation(
            "create requires <name> <username> <email>".to_string(),
        ));
    };

    let draft = UserPatch {
        name: Some(name.clone()),
        username: Some(username.clone()),
        email: Some(email.clone()),
        phone: rest.first().cloned(),
        website: rest.get(1).cloned(),
    };

    let id = ctx.users.submit_create(draft)?;
    println!("Created user {id}.");
    Ok(())
}

fn cmd_users_update(ctx: &mut AppContext, args: &[String]) -> Result<()> {
    let [id, fields @ ..] = args else {
        return Err(OpsdeckError::Validation(
            "update requires <id> <field>=<value>...".to_string(),
        ));
    };
    let id = parse_id(id)?;
    if ctx.users.store().get(id).is_none() {
        return Err(OpsdeckError::Validation(format!("no user with id {id}")));
    }

    let mut draft = UserPatch::default();
    for field in fields {
        apply_field(&mut draft, field)?;
    }

    ctx.users.submit_update(id, draft)?;
    println!("Updated user {id}.");
    Ok(())
}

fn apply_field(draft: &mut UserPatch, field: &str) -> Result<()> {
    let (key, value) = field.split_once('=').ok_or_else(|| {
        OpsdeckError::Validation(format!("expected <field>=<value>, got `{field}`"))
    })?;
    let value = value.to_string();
    match key {
        "name" => draft.name = Some(value),
        "username" => draft.username = Some(value),
        "email" => draft.email = Some(value),
        "phone" => draft.phone = Some(value),
        "website" => draft.website = Some(value),
        other => {
            return Err(OpsdeckError::Validation(format!("unknown field `{other}`")));
        }
    }
    Ok(())
}

fn cmd_users_delete(ctx: &mut AppContext, args: &[String]) -> Result<()> {
    let [id, rest @ ..] = args else {
        return Err(OpsdeckError::Validation("delete requires <id>".to_string()));
    };
    let id = parse_id(id)?;

    let confirmed =
        rest.iter().any(|arg| arg.as_str() == "--yes") || prompt_confirmation(id)?;

    if ctx.users.delete(id, confirmed)? {
        println!("Deleted user {id}.");
    } else {
        println!("Delete cancelled.");
    }
    Ok(())
}

fn prompt_confirmation(id: u64) -> Result<bool> {
    print!("Are you sure you want to delete user {id}? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn cmd_posts(ctx: &AppContext, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("list") | None => cmd_posts_list(ctx, args.get(1..).unwrap_or(&[])),
        Some("show") => {
            let id = args.get(1).ok_or_else(|| {
                OpsdeckError::Validation("show requires <id>".to_string())
            })?;
            cmd_posts_show(ctx, parse_id(id)?)
        }
        Some(other) => Err(OpsdeckError::Validation(format!(
            "unknown posts subcommand `{other}`\n\n{USAGE}"
        ))),
    }
}

fn cmd_posts_list(ctx: &AppContext, args: &[String]) -> Result<()> {
    let author = match args {
        [] => None,
        [key, id] if key.as_str() == "user" => Some(parse_id(id)?),
        _ => {
            return Err(OpsdeckError::Validation(
                "expected `user <id>`".to_string(),
            ));
        }
    };

    for post in posts::list(&ctx.posts, author)? {
        println!(
            "{:>4}  u{:<3} {}",
            post.id,
            post.user_id,
            posts::preview(&post.title, 60)
        );
    }
    Ok(())
}

fn cmd_posts_show(ctx: &AppContext, id: u64) -> Result<()> {
    let post = posts::detail(&ctx.posts, id)?;
    println!("#{} by user {}", post.id, post.user_id);
    println!("{}\n", post.title);
    println!("{}", post.body);
    Ok(())
}

fn cmd_todos(ctx: &AppContext, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("list") | None => cmd_todos_list(ctx, args.get(1..).unwrap_or(&[])),
        Some(other) => Err(OpsdeckError::Validation(format!(
            "unknown todos subcommand `{other}`\n\n{USAGE}"
        ))),
    }
}

fn cmd_todos_list(ctx: &AppContext, args: &[String]) -> Result<()> {
    let mut view = TodosViewState::default();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "sort" => {
                let column = args.next().ok_or_else(|| {
                    OpsdeckError::Validation("sort requires a column name".to_string())
                })?;
                let field = TodoSortField::from_name(column).ok_or_else(|| {
                    OpsdeckError::Validation(format!("unknown column `{column}`"))
                })?;
                view.toggle_sort(field);
            }
            other => {
                let filter = TodoFilter::from_name(other).ok_or_else(|| {
                    OpsdeckError::Validation(format!("unknown option `{other}`"))
                })?;
                view.set_filter(filter);
            }
        }
    }

    let todos = opsdeck::remote::RemoteCollection::fetch_all(&ctx.todos)?;
    for todo in view.projection(&todos) {
        println!(
            "{:>4}  [{}] u{:<3} {}",
            todo.id,
            if todo.completed { "x" } else { " " },
            todo.user_id,
            todo.title
        );
    }
    Ok(())
}

fn cmd_dashboard(ctx: &mut AppContext) -> Result<()> {
    ctx.users.load()?;
    let users = ctx.users.store().records().to_vec();

    // Posts and todos are read-only on the dashboard; fetch failures
    // degrade to empty series, like a failed bulk load.
    let posts = fetch_or_empty("posts", || {
        opsdeck::remote::RemoteCollection::fetch_all(&ctx.posts)
    });
    let todos = fetch_or_empty("todos", || {
        opsdeck::remote::RemoteCollection::fetch_all(&ctx.todos)
    });

    let totals = dashboard::totals(&users, &posts, &todos);
    println!("Users: {}  Posts: {}  Todos: {}", totals.users, totals.posts, totals.todos);

    println!("\nPosts per user:");
    for row in dashboard::posts_per_user(&users, &posts) {
        println!("  {:<12} {}", row.name, row.posts);
    }

    let completion = dashboard::todo_completion(&todos);
    println!("\nTodos: {} completed, {} pending", completion.completed, completion.pending);

    println!("\nTodos per user (first five):");
    for row in dashboard::todos_per_user(&users, &todos) {
        println!("  {:<12} {} completed, {} pending", row.name, row.completed, row.pending);
    }
    Ok(())
}

fn fetch_or_empty<T>(collection: &str, fetch: impl FnOnce() -> Result<Vec<T>>) -> Vec<T> {
    match fetch() {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(collection, error = %e, "dashboard fetch failed, using empty series");
            Vec::new()
        }
    }
}

fn parse_id(raw: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| OpsdeckError::Validation(format!("invalid id `{raw}`")))
}
