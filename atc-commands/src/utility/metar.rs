use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use atc_core::{Context, Error};
use atc_metar::{MetarClient, MetarError, MetarLookup, format_report, is_valid_icao};

pub const META: CommandMeta = CommandMeta {
    name: "metar",
    aliases: &[],
    desc: "Show the decoded METAR for an airport.",
    category: "utility",
    usage: ".metar <icao>",
    required: serenity::Permissions::empty(),
};

#[poise::command(prefix_command, category = "Utility")]
pub async fn metar(
    ctx: Context<'_>,
    #[description = "ICAO airport code, e.g. KJFK"] icao: Option<String>,
) -> Result<(), Error> {
    let Some(icao) = icao else {
        ctx.say(format!("Usage: `{}`", META.usage)).await?;
        return Ok(());
    };

    let reply = lookup_reply(ctx.data().metar.as_ref(), &icao).await;
    ctx.say(reply).await?;
    Ok(())
}

pub async fn lookup_reply(client: Option<&MetarClient>, raw_icao: &str) -> String {
    let icao = raw_icao.trim().to_ascii_uppercase();
    if !is_valid_icao(&icao) {
        return format!(
            ":warning: `{}` is not an ICAO code. Usage: `{}`",
            icao, META.usage
        );
    }

    let Some(client) = client else {
        return "METAR lookups are not configured.".to_owned();
    };

    reply_for_lookup(&icao, client.fetch(&icao).await)
}

fn reply_for_lookup(icao: &str, lookup: Result<MetarLookup, MetarError>) -> String {
    match lookup {
        Ok(MetarLookup::Found(report)) => format_report(icao, &report),
        Ok(MetarLookup::NotFound) => format!(":warning: No METAR found for `{}`.", icao),
        Ok(MetarLookup::Unavailable { status }) => {
            error!(icao, status, "metar api returned an error status");
            ":x: Could not fetch data.".to_owned()
        }
        Err(source) => {
            error!(?source, icao, "metar lookup failed");
            ":x: Could not fetch data.".to_owned()
        }
    }
}
