//! Naming Shell
//!
//! Drives an in-process naming tree from the command line. Commands come
//! from `-e`, from a script file, or one per line on stdin.
//!
//! Run with: cargo run --bin naming-shell -- -e "bind-context dept" -e "bind dept/printer IDL:Printer:1.0" -e "tree"

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cosnaming::{
    BindingType, ContextRef, NamingConfig, NamingContextExt, NamingContextHandle, NamingError,
    NamingService, ObjectRef, SortedBindingTable,
};

const DEFAULT_TYPE_ID: &str = "IDL:omg.org/CORBA/Object:1.0";

#[derive(Parser)]
#[command(name = "naming-shell")]
#[command(about = "Bind, resolve and list names in an in-process naming tree")]
struct Args {
    /// Command to run; may be repeated
    #[arg(short = 'e', long = "exec")]
    commands: Vec<String>,

    /// File with one command per line
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// List bindings in sorted order
    #[arg(long)]
    sorted: bool,

    /// Maximum bindings fetched per iterator call
    #[arg(short, long, default_value = "16")]
    batch: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Error, Debug)]
enum ShellError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error(transparent)]
    Naming(#[from] NamingError),
}

/// One shell command; names are in stringified form
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Bind { name: String, type_id: String },
    Rebind { name: String, type_id: String },
    BindContext { name: String },
    Unbind { name: String },
    Resolve { name: String },
    List { name: Option<String> },
    Tree,
    Url { address: String, name: String },
    Destroy { name: String },
}

impl Command {
    /// Parse a line; blank lines and `#` comments yield `None`
    fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let arg = |i: usize, usage: &'static str| {
            words
                .get(i)
                .map(|w| w.to_string())
                .ok_or(ShellError::Usage(usage))
        };
        let type_id = || words.get(2).unwrap_or(&DEFAULT_TYPE_ID).to_string();

        let command = match words[0] {
            "bind" => Self::Bind {
                name: arg(1, "bind <name> [type-id]")?,
                type_id: type_id(),
            },
            "rebind" => Self::Rebind {
                name: arg(1, "rebind <name> [type-id]")?,
                type_id: type_id(),
            },
            "bind-context" | "mkdir" => Self::BindContext {
                name: arg(1, "bind-context <name>")?,
            },
            "unbind" => Self::Unbind {
                name: arg(1, "unbind <name>")?,
            },
            "resolve" => Self::Resolve {
                name: arg(1, "resolve <name>")?,
            },
            "list" | "ls" => Self::List {
                name: words.get(1).map(|w| w.to_string()),
            },
            "tree" => Self::Tree,
            "url" => Self::Url {
                address: arg(1, "url <address> <name>")?,
                name: arg(2, "url <address> <name>")?,
            },
            "destroy" => Self::Destroy {
                name: arg(1, "destroy <name>")?,
            },
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

struct Shell {
    service: NamingService,
    batch: usize,
}

impl Shell {
    fn new(service: NamingService, batch: usize) -> Self {
        Self {
            service,
            batch: batch.max(1),
        }
    }

    /// Resolve `sn` and require a context
    fn context_at(&self, sn: Option<&str>) -> Result<ContextRef, ShellError> {
        let root = self.service.root();
        let Some(sn) = sn else {
            return Ok(root);
        };
        let name = root.to_name(sn)?;
        root.resolve(&name)?
            .narrow_context()
            .ok_or_else(|| NamingError::not_context(name).into())
    }

    fn run(&self, command: Command) -> Result<(), ShellError> {
        debug!("running {:?}", command);
        let root = self.service.root();
        match command {
            Command::Bind { name, type_id } => {
                root.bind(&root.to_name(&name)?, ObjectRef::object(type_id))?;
                info!("bound {}", name);
            }
            Command::Rebind { name, type_id } => {
                root.rebind(&root.to_name(&name)?, ObjectRef::object(type_id))?;
                info!("rebound {}", name);
            }
            Command::BindContext { name } => {
                let ctx = root.bind_new_context(&root.to_name(&name)?)?;
                info!("bound {} -> context {}", name, ctx.key());
            }
            Command::Unbind { name } => {
                root.unbind(&root.to_name(&name)?)?;
                info!("unbound {}", name);
            }
            Command::Resolve { name } => {
                info!("{} -> {}", name, describe(&root.resolve_str(&name)?));
            }
            Command::List { name } => {
                let ctx = self.context_at(name.as_deref())?;
                for (sn, binding_type) in self.entries(&ctx)? {
                    println!("{:<8} {}", type_label(binding_type), sn);
                }
            }
            Command::Tree => self.print_tree(&root, "")?,
            Command::Url { address, name } => {
                println!("{}", root.to_url(&address, &name)?);
            }
            Command::Destroy { name } => {
                let ctx = self.context_at(Some(&name))?;
                ctx.destroy()?;
                root.unbind(&root.to_name(&name)?)?;
                info!("destroyed {}", name);
            }
        }
        Ok(())
    }

    /// Drain a context's listing through its iterator
    fn entries(&self, ctx: &ContextRef) -> Result<Vec<(String, BindingType)>, ShellError> {
        let list = ctx.list(self.batch)?;
        let mut bindings = list.bindings;
        loop {
            let (batch, delivered) = list.iterator.next_n(self.batch)?;
            if !delivered {
                break;
            }
            bindings.extend(batch);
        }
        list.iterator.destroy();

        bindings
            .into_iter()
            .map(|b| {
                let sn = NamingContextExt::to_string(&**ctx, &b.name)?;
                Ok::<_, ShellError>((sn, b.binding_type))
            })
            .collect()
    }

    fn print_tree(&self, ctx: &ContextRef, prefix: &str) -> Result<(), ShellError> {
        for (sn, binding_type) in self.entries(ctx)? {
            let path = if prefix.is_empty() {
                sn
            } else {
                format!("{}/{}", prefix, sn)
            };
            match binding_type {
                BindingType::Context => {
                    println!("{}/", path);
                    let child = self.context_at(Some(&path))?;
                    self.print_tree(&child, &path)?;
                }
                BindingType::Object => println!("{}", path),
            }
        }
        Ok(())
    }
}

fn type_label(binding_type: BindingType) -> &'static str {
    match binding_type {
        BindingType::Context => "context",
        BindingType::Object => "object",
    }
}

fn describe(obj: &ObjectRef) -> String {
    match obj {
        ObjectRef::Nil => "nil".to_string(),
        ObjectRef::Object(handle) => format!("object {} ({})", handle.key, handle.type_id),
        ObjectRef::Context(ctx) => match ctx.as_local() {
            Some(local) => match local.binding_count() {
                Ok(count) => format!("context {} ({} binding(s))", ctx.key(), count),
                Err(_) => format!("context {} (destroyed)", ctx.key()),
            },
            None => format!("context {} (remote)", ctx.key()),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NamingConfig::new().with_max_batch_size(args.batch);
    let service = if args.sorted {
        NamingService::with_store(config, Box::new(SortedBindingTable::new()))
    } else {
        NamingService::new(config)
    };
    let shell = Shell::new(service, args.batch);

    let mut lines = args.commands.clone();
    if let Some(path) = &args.script {
        lines.extend(fs::read_to_string(path)?.lines().map(str::to_string));
    }
    if lines.is_empty() {
        info!("reading commands from stdin");
        for line in io::stdin().lock().lines() {
            execute(&shell, &line?);
        }
        return Ok(());
    }

    for line in &lines {
        execute(&shell, line);
    }
    Ok(())
}

/// Run one line, reporting failures without stopping the shell
fn execute(shell: &Shell, line: &str) {
    match Command::parse(line) {
        Ok(Some(command)) => {
            if let Err(e) = shell.run(command) {
                warn!("{}: {}", line.trim(), e);
            }
        }
        Ok(None) => {}
        Err(e) => warn!("{}", e),
    }
}
