#![doc(hidden)]

//! A proof-of-concept for the basic use case, mocking the client/server parts.

use clap::Parser;
use log::{info, warn};
use recordtree::{compat::Sha512, Digest, HashProof, Record, Sha512Tree};


const DATA: [&str; 3] = [
    "hello record tree",
    "this is the second record",
    "and a third one to fold",
];

#[derive(Parser, Debug)]
#[command(about = "Back records up on a mock server and restore them, checking each against the root hash")]
struct Cli {
    /// Number of records to back up
    #[arg(short, long, default_value_t = 10)]
    records: usize,

    /// Index of a record the server corrupts once the backup is done
    #[arg(short, long)]
    corrupt: Option<usize>,

    /// Header attached to each record
    #[arg(long, default_value = "")]
    header: String,
}

#[derive(Default)]
struct Server {
    tree: Sha512Tree,
    stored_records: Vec<Record>,
}

impl Server {
    async fn upload_record(&mut self, value: String, header: &str) -> Result<String, &'static str> {
        let record = self.tree.append_with_header(value, header).clone();
        self.stored_records.push(record);

        let root = self.tree.root().ok_or("Upload failed, please retry...")?;
        println!("Record #{} successfully uploaded (root hash: {root})", self.stored_records.len() - 1);

        Ok(root.to_string())
    }

    async fn download_record(&self, index: usize) -> Result<(Record, HashProof<'_, Sha512>), &'static str> {
        let record = self.stored_records.get(index).ok_or("Record not found...")?;
        let proof = self.tree.proof(&self.tree.history()[index]).ok_or("Record not found...")?;

        Ok((record.clone(), proof))
    }

    /// Corrupt the stored copy of a record, returning whether there was one to corrupt.
    fn alter_record(&mut self, index: usize) -> bool {
        let Some(record) = self.stored_records.get_mut(index) else {
            warn!("record #{index} not found, nothing to corrupt");
            return false;
        };

        let value: String = record
            .value()
            .chars()
            .map(|c| match c {
                _ if c.is_ascii_lowercase() => c.to_ascii_uppercase(),
                _ if c.is_ascii_uppercase() => c.to_ascii_lowercase(),
                _ => '#',
            })
            .collect();
        *record = record.with_value(value);

        println!("Oh noes, record #{index} got corrupted on server side!!!");

        true
    }
}

#[derive(Default)]
struct Client {
    root_hash: Option<Digest>,
}

impl Client {
    async fn store_root_hash(&mut self, root_hash: &str) -> Result<(), &'static str> {
        self.root_hash = Some(root_hash.parse().map_err(|_| "Invalid root hash...")?);

        Ok(())
    }

    async fn backup_records(
        &self,
        server: &mut Server,
        values: impl IntoIterator<Item = String>,
        header: &str,
    ) -> Result<String, &'static str> {
        let mut tree = Sha512Tree::new();
        let mut published = None;

        for value in values {
            tree.append_with_header(&value, header);
            published = Some(server.upload_record(value, header).await?);
        }

        // salts and creation times differ on both sides, but they are not part of the root
        match (tree.root(), published) {
            (Some(root), Some(published)) if root.as_str() == published => Ok(published),
            (_, None) => Err("Nothing to back up..."),
            _ => Err("Something went wrong..."),
        }
    }

    async fn restore_record(&self, server: &Server, index: usize) -> Result<Record, &'static str> {
        let (record, proof) = server.download_record(index).await?;

        self.check_record(&record, proof)?;

        Ok(record)
    }

    fn check_record(&self, record: &Record, proof: HashProof<Sha512>) -> Result<(), &'static str> {
        match self.root_hash.as_ref() {
            Some(root) if root == proof.root() && proof.verify(record.digest::<Sha512>()) => Ok(()),
            _ => {
                warn!("record #{} failed verification against the stored root", record.sequence_id());
                Err("Record is corrupted!")
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), &'static str> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("backing up {} record(s)", cli.records);

    let mut server = Server::default();
    let mut client = Client::default();

    let values = DATA.iter().cycle().take(cli.records).enumerate().map(|(i, data)| format!("{data} #{i}"));

    println!("Uploading records for backup...");
    let root_hash = client.backup_records(&mut server, values, &cli.header).await?;

    println!("Storing local information... (root hash: {root_hash})");
    client.store_root_hash(&root_hash).await?;

    if let Some(index) = cli.corrupt {
        server.alter_record(index);
    }

    for index in 0..cli.records + 1 {
        print!("Restoring record #{index}...");
        let res = client.restore_record(&server, index).await.map(|record| record.value().to_owned());
        println!(" {res:?}");
    }

    Ok(())
}
