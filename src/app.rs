/*
 * Responsibility
 * - Config load -> gateway/controller wiring -> input loop
 * - Owns every user gesture: command parsing, the edit form prompts, and the
 *   delete confirmation (a declined confirmation never reaches the controller)
 * - Prints render::render() snapshots; controller errors are displayed here,
 *   never swallowed
 */
use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::config::Config;
use crate::error::AppError;
use crate::gateway::client::PostGateway;
use crate::gateway::dto::PostInput;
use crate::gateway::http::HttpGateway;
use crate::render::render;
use crate::services::list_sync::ListSyncController;
use crate::state::{EditTarget, SearchStrategy};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex: RUST_LOG=info,postdeck=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!(base_url = %config.base_url, page_size = config.page_size, "starting");

    let gateway = HttpGateway::new(config.base_url.clone(), config.timeout)?;
    let mut controller = ListSyncController::new(gateway.clone(), config.page_size);

    report(controller.start().await);
    print!("{}", render(controller.state()));
    print_help();

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(line) = prompt(&mut input, "> ").await? else {
            break;
        };
        let mut words = line.split_whitespace();

        match words.next() {
            None => continue,
            Some("help") => {
                print_help();
                continue;
            }
            Some("quit") | Some("q") => break,
            Some("next") | Some("n") => report(controller.change_page(1).await),
            Some("prev") | Some("p") => report(controller.change_page(-1).await),
            Some("page") => match words.next().and_then(|w| w.parse::<u32>().ok()) {
                Some(page) => report(controller.load_page(page).await),
                None => println!("usage: page <number>"),
            },
            Some("search") => {
                let term = words.collect::<Vec<_>>().join(" ");
                report(controller.search(&term, SearchStrategy::Jpql).await);
            }
            Some("proc") => {
                let term = words.collect::<Vec<_>>().join(" ");
                report(controller.search(&term, SearchStrategy::Procedure).await);
            }
            Some("clear") => report(controller.clear_search().await),
            Some("new") => {
                edit_flow(&mut controller, &mut input, EditTarget::New, config.user_id).await?;
            }
            Some("edit") => match words.next().and_then(|w| w.parse::<i64>().ok()) {
                Some(id) => {
                    // The form edits the copy we already display, like
                    // clicking "Edit" on a list entry.
                    let target = controller.state().items.iter().find(|p| p.id == id).cloned();
                    match target {
                        Some(post) => {
                            let target = EditTarget::Existing(post);
                            edit_flow(&mut controller, &mut input, target, config.user_id).await?;
                        }
                        None => println!("post {id} is not in the current view"),
                    }
                }
                None => println!("usage: edit <id>"),
            },
            Some("delete") => match words.next().and_then(|w| w.parse::<i64>().ok()) {
                Some(id) => {
                    if confirm(&mut input, &format!("delete post {id}? [y/N] ")).await? {
                        report(controller.delete_post(id).await);
                    }
                }
                None => println!("usage: delete <id>"),
            },
            Some("show") => match words.next().and_then(|w| w.parse::<i64>().ok()) {
                Some(id) => match gateway.get(id).await {
                    Ok(post) => println!(
                        "#{} {} ({})\n{}",
                        post.id,
                        post.title,
                        post.created_at.format("%Y-%m-%d %H:%M"),
                        post.content
                    ),
                    Err(e) => println!("error: {e}"),
                },
                None => println!("usage: show <id>"),
            },
            Some(other) => {
                println!("unknown command: {other} (try `help`)");
                continue;
            }
        }

        print!("{}", render(controller.state()));
    }

    Ok(())
}

fn print_help() {
    println!(
        "commands: next/prev | page N | search TERM | proc TERM | clear | \
         new | edit ID | delete ID | show ID | help | quit"
    );
}

/// Display a command outcome. Errors end up here and nowhere else; the
/// controller has already kept its state consistent.
fn report(outcome: Result<(), AppError>) {
    match outcome {
        Ok(()) => {}
        Err(e @ AppError::NotFound { .. }) => {
            println!("error: {e} (it may have been removed; clear or reload the view)");
        }
        Err(e) => println!("error: {e}"),
    }
}

async fn prompt(input: &mut Lines<BufReader<Stdin>>, text: &str) -> Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;

    Ok(input.next_line().await?)
}

async fn confirm(input: &mut Lines<BufReader<Stdin>>, question: &str) -> Result<bool> {
    let Some(answer) = prompt(input, question).await? else {
        return Ok(false);
    };

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// The form surface. Prompts for the two fields, submits, and loops on
/// failure so the user can retry; an empty title aborts the edit.
async fn edit_flow<G: PostGateway>(
    controller: &mut ListSyncController<G>,
    input: &mut Lines<BufReader<Stdin>>,
    target: EditTarget,
    user_id: i64,
) -> Result<()> {
    if let EditTarget::Existing(post) = &target {
        println!("editing #{}: {} / {}", post.id, post.title, post.content);
    }
    controller.begin_edit(target);
    println!("(empty title cancels)");

    loop {
        let Some(title) = prompt(input, "title> ").await? else {
            controller.cancel_edit();
            return Ok(());
        };
        if title.trim().is_empty() {
            controller.cancel_edit();
            println!("cancelled");
            return Ok(());
        }
        let Some(content) = prompt(input, "content> ").await? else {
            controller.cancel_edit();
            return Ok(());
        };

        let submitted = PostInput {
            title,
            content,
            user_id,
        };
        match controller.submit_edit(submitted).await {
            Ok(()) => {
                println!("saved");
                return Ok(());
            }
            // Both validation and network failures leave the form open; ask
            // again rather than dropping what the user typed a moment ago.
            Err(e) => println!("error: {e}"),
        }
    }
}
