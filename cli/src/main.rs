//! A thin command-line front end wiring one vendor adapter at a time
//! against a reference dataset, the same shape `main.rs`'s
//! download-then-index pipeline takes in the example this crate started
//! from, generalized to pluggable adapters instead of one hardcoded
//! Scryfall pull.

use clap::{Parser, ValueEnum};
use mtgmatch_core::adapter::{Seller, Vendor};
use mtgmatch_core::reference::schema::ReferenceFile;
use mtgmatch_core::reference::Datastore;
use mtgmatch_vendors::fetch::ReqwestFetcher;
use mtgmatch_vendors::{AbuGames, CardKingdom, ChannelFireball, JupiterGames};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VendorArg {
    CardKingdom,
    ChannelFireball,
    JupiterGames,
    AbuGames,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Inventory,
    Buylist,
}

/// Fetch one vendor's current inventory or buylist and print how many
/// canonical ids it resolved against the reference dataset.
#[derive(Debug, Parser)]
#[command(name = "mtgmatch", version, about)]
struct Cli {
    /// Which vendor adapter to run.
    #[arg(long, value_enum)]
    vendor: VendorArg,

    /// Whether to pull the vendor's inventory or buylist.
    #[arg(long, value_enum, default_value = "inventory")]
    mode: ModeArg,

    /// Path to an MTGJSON-shaped reference dataset (AllPrintings.json).
    #[arg(long)]
    reference: std::path::PathBuf,
}

fn load_datastore(path: &std::path::Path) -> anyhow::Result<Datastore> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let doc: ReferenceFile = serde_json::from_reader(reader)?;
    Ok(Datastore::build(&doc))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let datastore = Arc::new(load_datastore(&cli.reference)?);
    let fetcher = ReqwestFetcher::new("mtgmatch-cli/0.1")?;

    match (cli.vendor, cli.mode) {
        (VendorArg::CardKingdom, ModeArg::Inventory) => {
            let mut ck = CardKingdom::new(fetcher, datastore);
            let record = ck.inventory()?;
            println!("Card Kingdom inventory: {} entries across {} ids", record.len(), record.ids().count());
        }
        (VendorArg::CardKingdom, ModeArg::Buylist) => {
            let mut ck = CardKingdom::new(fetcher, datastore);
            let record = ck.buylist()?;
            println!("Card Kingdom buylist: {} entries across {} ids", record.len(), record.ids().count());
        }
        (VendorArg::ChannelFireball, ModeArg::Inventory) => {
            anyhow::bail!("Channel Fireball only exposes a buylist");
        }
        (VendorArg::ChannelFireball, ModeArg::Buylist) => {
            let mut cfb = ChannelFireball::new(fetcher, datastore);
            let record = cfb.buylist()?;
            println!("Channel Fireball buylist: {} entries across {} ids", record.len(), record.ids().count());
        }
        (VendorArg::JupiterGames, ModeArg::Inventory) => {
            anyhow::bail!("Jupiter Games only exposes a buylist");
        }
        (VendorArg::JupiterGames, ModeArg::Buylist) => {
            let urls = vec!["https://www.jupitergames.ca/buylist?page=1".to_string()];
            let mut jg = JupiterGames::new(fetcher, datastore, urls);
            let record = jg.buylist()?;
            println!("Jupiter Games buylist: {} entries across {} ids", record.len(), record.ids().count());
        }
        (VendorArg::AbuGames, ModeArg::Inventory) => {
            let mut abu = AbuGames::new(fetcher, datastore);
            let record = abu.inventory()?;
            println!("ABU Games inventory: {} entries across {} ids", record.len(), record.ids().count());
        }
        (VendorArg::AbuGames, ModeArg::Buylist) => {
            anyhow::bail!("ABU Games only exposes an inventory");
        }
    }

    Ok(())
}
