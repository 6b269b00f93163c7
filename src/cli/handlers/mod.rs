use std::io::{self, BufRead, Write};
use std::path::Path;

use log::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::{FileStore, load_tasks, resolve_store_dir, save_tasks};
use crate::logging;
use crate::model::{Filter, TaskList};
use crate::ops::flow::{Event, Outcome, Session};
use crate::ops::task_ops::TaskError;
use crate::ops::view::project;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a write command needs: the session over the loaded list and
/// where to write it back.
struct Context {
    session: Session,
    store: FileStore,
    store_key: String,
}

impl Context {
    fn load(store_dir: &Path) -> Result<Context, Box<dyn std::error::Error>> {
        let config = config_io::read_config(store_dir)?;
        if let Err(e) = logging::init_for_store(&config.log.level, store_dir) {
            eprintln!("warning: logging disabled: {}", e);
        }
        let store_key = config.store_key().to_string();
        let store = FileStore::new(store_dir);
        let tasks = load_tasks(&store, &store_key);
        Ok(Context {
            session: Session::new(tasks),
            store,
            store_key,
        })
    }

    fn tasks(&self) -> &TaskList {
        &self.session.tasks
    }

    /// Apply an event, turning a rejected validation into an error.
    fn apply(&mut self, event: Event) -> Result<Outcome, TaskError> {
        let outcome = self.session.apply(event);
        if let Some(err) = &outcome.rejected {
            return Err(err.clone());
        }
        Ok(outcome)
    }

    fn save(&mut self) -> CliResult {
        save_tasks(&mut self.store, &self.store_key, &self.session.tasks)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CliResult {
    let json = cli.json;
    let store_dir = resolve_store_dir(cli.store_dir.as_deref().map(Path::new))?;

    match cli.command {
        None => Err("no subcommand given (run `td` without arguments for the TUI)".into()),
        Some(cmd) => {
            let mut ctx = Context::load(&store_dir)?;
            info!(
                "event=cli_start module=cli status=ok store_dir={} tasks={}",
                store_dir.display(),
                ctx.tasks().len()
            );
            match cmd {
                Commands::List(args) => cmd_list(&ctx, args, json),
                Commands::Add(args) => cmd_add(&mut ctx, args, json),
                Commands::Edit(args) => cmd_edit(&mut ctx, args, json),
                Commands::Toggle(args) => cmd_toggle(&mut ctx, args, json),
                Commands::Delete(args) => cmd_delete(&mut ctx, args, json),
                Commands::Clear(args) => cmd_clear(&mut ctx, args, json),
                Commands::MarkAll(args) => cmd_mark_all(&mut ctx, args, json),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a 1-based task number from the command line to a list index.
fn task_index(number: usize, tasks: &TaskList) -> Result<usize, TaskError> {
    match number.checked_sub(1) {
        Some(index) if index < tasks.len() => Ok(index),
        _ => Err(TaskError::IndexOutOfRange(number)),
    }
}

/// Ask a yes/no question on stderr and read the answer from stdin.
/// Anything other than `y`/`yes` (including EOF) is a no.
fn ask_confirm(question: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", question)?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn print_change(
    action: &'static str,
    count: usize,
    task: Option<TaskJson>,
    json: bool,
) -> CliResult {
    if json {
        let change = ChangeJson {
            action,
            count,
            task,
        };
        println!("{}", serde_json::to_string_pretty(&change)?);
    } else if let Some(task) = task {
        println!("{} {}: {}", action, task.number, task.text);
    } else {
        println!("{} {} task{}", action, count, if count == 1 { "" } else { "s" });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> CliResult {
    let filter: Filter = args.filter.parse()?;
    let view = project(ctx.tasks(), filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&projection_to_json(&view))?);
    } else {
        for line in format_listing(&view) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &mut Context, args: AddArgs, json: bool) -> CliResult {
    // Same path as the input line: submit, fill the deadline dialog, confirm
    ctx.apply(Event::Submit(args.text))?;
    ctx.apply(Event::SetDeadlineInput(args.deadline))?;
    if let Err(e) = ctx.apply(Event::Confirm) {
        ctx.apply(Event::Cancel)?;
        return Err(e.into());
    }
    ctx.save()?;
    let index = ctx.tasks().len() - 1;
    let task = ctx.tasks().get(index).map(|t| task_to_json(index, t));
    print_change("added", 1, task, json)
}

fn cmd_edit(ctx: &mut Context, args: EditArgs, json: bool) -> CliResult {
    let index = task_index(args.index, ctx.tasks())?;
    ctx.apply(Event::Edit(index))?;
    ctx.apply(Event::Submit(args.text))?;
    ctx.save()?;
    let task = ctx.tasks().get(index).map(|t| task_to_json(index, t));
    print_change("updated", 1, task, json)
}

fn cmd_toggle(ctx: &mut Context, args: ToggleArgs, json: bool) -> CliResult {
    let index = task_index(args.index, ctx.tasks())?;
    ctx.apply(Event::Toggle(index))?;
    ctx.save()?;
    let task = ctx.tasks().get(index).map(|t| task_to_json(index, t));
    let action = match &task {
        Some(t) if t.completed => "completed",
        _ => "reopened",
    };
    print_change(action, 1, task, json)
}

fn cmd_delete(ctx: &mut Context, args: DeleteArgs, json: bool) -> CliResult {
    let index = task_index(args.index, ctx.tasks())?;
    let task = ctx.tasks().get(index).map(|t| task_to_json(index, t));
    ctx.apply(Event::RequestDelete(index))?;

    if args.yes || ask_confirm("Are you sure you want to delete this task?")? {
        ctx.apply(Event::Confirm)?;
        ctx.save()?;
        print_change("deleted", 1, task, json)
    } else {
        ctx.apply(Event::Cancel)?;
        print_change("kept", 0, None, json)
    }
}

fn cmd_clear(ctx: &mut Context, args: ClearArgs, json: bool) -> CliResult {
    let count = ctx.tasks().len();
    let outcome = ctx.apply(Event::RequestDeleteAll)?;
    if outcome.ignored {
        return print_change("deleted", 0, None, json);
    }

    if args.yes || ask_confirm("Are you sure you want to delete all tasks?")? {
        ctx.apply(Event::Confirm)?;
        ctx.save()?;
        print_change("deleted", count, None, json)
    } else {
        ctx.apply(Event::Cancel)?;
        print_change("kept", 0, None, json)
    }
}

fn cmd_mark_all(ctx: &mut Context, args: MarkAllArgs, json: bool) -> CliResult {
    let done = !args.undone;
    let outcome = ctx.apply(Event::MarkAll(done))?;
    if outcome.changed {
        ctx.save()?;
    }
    let action = if done { "completed" } else { "reopened" };
    let count = if outcome.changed { ctx.tasks().len() } else { 0 };
    print_change(action, count, None, json)
}
