use std::time::Duration;

use poise::serenity_prelude as serenity;

use crate::embed::DEFAULT_EMBED_COLOR;

pub const PAGINATION_TIMEOUT_SECS: u64 = 60 * 3;

/// Number of pages needed for `total_items`; never less than one.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1)).max(1)
}

/// Index range of the items on 1-based `page`.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);
    (start, end)
}

fn build_page_embed(
    title: &str,
    description: &str,
    page: usize,
    total_pages: usize,
    author_icon_url: Option<&str>,
) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .description(description.to_owned());

    if total_pages > 1 {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
            "Page {page}/{total_pages}"
        )));
    }

    match author_icon_url {
        Some(url) => embed.author(serenity::CreateEmbedAuthor::new(title).icon_url(url)),
        None => embed.title(title.to_owned()),
    }
}

fn page_buttons(
    prev_id: &str,
    next_id: &str,
    current_page: usize,
    total_pages: usize,
) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(prev_id)
            .label("Prev")
            .disabled(current_page == 0)
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(next_id)
            .label("Next")
            .disabled(current_page + 1 >= total_pages)
            .style(serenity::ButtonStyle::Secondary),
    ])]
}

/// Reply with `pages` as embed descriptions, one page at a time.
///
/// Only the invoking user can flip pages. The buttons are removed once the
/// collector times out.
pub async fn paginate_embed_pages<U, E>(
    ctx: poise::Context<'_, U, E>,
    title: &str,
    pages: &[String],
    author_icon_url: Option<&str>,
) -> Result<(), serenity::Error>
where
    U: Send + Sync + 'static,
    E: Send + Sync,
{
    if pages.is_empty() {
        return Ok(());
    }

    let total_pages = pages.len();
    let mut current_page = 0;

    if total_pages == 1 {
        ctx.send(poise::CreateReply::default().embed(build_page_embed(
            title,
            &pages[0],
            1,
            1,
            author_icon_url,
        )))
        .await?;
        return Ok(());
    }

    let ctx_id = ctx.id();
    let prev_button_id = format!("{ctx_id}_prev");
    let next_button_id = format!("{ctx_id}_next");

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(build_page_embed(
                    title,
                    &pages[current_page],
                    current_page + 1,
                    total_pages,
                    author_icon_url,
                ))
                .components(page_buttons(
                    &prev_button_id,
                    &next_button_id,
                    current_page,
                    total_pages,
                )),
        )
        .await?;
    let message_id = reply.message().await?.id;

    while let Some(press) = serenity::collector::ComponentInteractionCollector::new(ctx)
        .filter({
            let prefix = ctx_id.to_string();
            let author_id = ctx.author().id;
            move |interaction| {
                interaction.data.custom_id.starts_with(&prefix)
                    && interaction.user.id == author_id
                    && interaction.message.id == message_id
            }
        })
        .timeout(Duration::from_secs(PAGINATION_TIMEOUT_SECS))
        .await
    {
        if press.data.custom_id == next_button_id {
            current_page = (current_page + 1).min(total_pages - 1);
        } else if press.data.custom_id == prev_button_id {
            current_page = current_page.saturating_sub(1);
        } else {
            continue;
        }

        press
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(build_page_embed(
                            title,
                            &pages[current_page],
                            current_page + 1,
                            total_pages,
                            author_icon_url,
                        ))
                        .components(page_buttons(
                            &prev_button_id,
                            &next_button_id,
                            current_page,
                            total_pages,
                        )),
                ),
            )
            .await?;
    }

    let _ = reply
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(build_page_embed(
                    title,
                    &pages[current_page],
                    current_page + 1,
                    total_pages,
                    author_icon_url,
                ))
                .components(Vec::new()),
        )
        .await;

    Ok(())
}
