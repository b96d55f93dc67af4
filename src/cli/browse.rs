use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::timeout,
};

use crate::{
    cli::print_tracks,
    context::AppContext,
    debounce::Debouncer,
    info,
    jamendo::CatalogApi,
    tracks::{Connectivity, SearchSession, messages::OFFLINE_BANNER_MESSAGE},
    warning,
};

async fn render<C, N>(session: &mut SearchSession<'_, C, N>)
where
    C: CatalogApi + Sync,
    N: Connectivity + Sync,
{
    let view = session.view().await;
    if view.is_offline {
        warning!("{}", OFFLINE_BANNER_MESSAGE);
    }

    if !view.has_active_query {
        info!("Search tracks to get started.");
        return;
    }

    if let Some(e) = &view.list_error {
        warning!("{}", e);
    }

    if view.tracks.is_empty() {
        if view.list_error.is_none() {
            info!("No matches. Try a different search.");
        }
        return;
    }

    print_tracks(&view.tracks);
    if view.show_load_more_hint {
        info!("Type :more to load more results.");
    }
}

/// Reads search text line by line from standard input. Lines are debounced
/// like keystrokes in a search field; `:more`, `:refresh` and `:quit` act
/// immediately.
pub async fn browse(ctx: &AppContext) {
    let (mut debouncer, mut settled) = Debouncer::new(ctx.debounce);
    let mut session = SearchSession::new(&ctx.controller, ctx.page_limit);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    ctx.controller.check_connectivity().await;
    info!("Type to search. Commands: :more, :refresh, :quit");
    render(&mut session).await;

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match line.trim() {
                    ":quit" | ":q" => break,
                    ":more" => {
                        if session.load_more().await.is_some() {
                            render(&mut session).await;
                        } else {
                            info!("Nothing more to load.");
                        }
                    }
                    ":refresh" => {
                        session.refresh().await;
                        render(&mut session).await;
                    }
                    _ => debouncer.push(line),
                },
                Ok(None) => {
                    // Input closed; let the last pending text settle.
                    if let Ok(Some(text)) = timeout(debouncer.delay() * 2, settled.recv()).await {
                        if session.on_settled_text(&text).await.is_some() {
                            render(&mut session).await;
                        }
                    }
                    break;
                }
                Err(e) => {
                    warning!("Cannot read input. Err: {}", e);
                    break;
                }
            },
            Some(text) = settled.recv() => {
                session.on_settled_text(&text).await;
                render(&mut session).await;
            }
        }
    }
}
