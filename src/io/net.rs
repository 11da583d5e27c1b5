use crate::{config::SplitterConfig, error::Result};
use reqwest::blocking::Client;
use std::{
    fs,
    fs::File,
    io::{Read, Write},
    path::Path,
};
use tracing::debug;

pub fn http_client(cfg: &SplitterConfig) -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.download_timeout)
        .build()?;
    Ok(client)
}

/// Stream `url` into `dest`. The body goes to `<file name>.part` first so a failed
/// transfer never leaves a file at `dest`. Returns the number of bytes written.
pub fn download_to(client: &Client, url: &str, dest: &Path) -> Result<u64> {
    let mut part_name = dest.file_name().unwrap_or_default().to_os_string();
    part_name.push(".part");
    let tmp = dest.with_file_name(part_name);

    let res = stream_body(client, url, &tmp);
    let written = match res {
        Ok(n) => n,
        Err(e) => {
            fs::remove_file(&tmp).ok();
            return Err(e);
        }
    };

    if dest.exists() {
        fs::remove_file(dest).ok();
    }
    fs::rename(&tmp, dest)?;

    Ok(written)
}

fn stream_body(client: &Client, url: &str, tmp: &Path) -> Result<u64> {
    let mut resp = client.get(url).send()?.error_for_status()?;

    let total = resp.content_length().unwrap_or(0);
    debug!(url, total, "response received");

    let mut file = File::create(tmp)?;
    let mut downloaded: u64 = 0;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = resp.read(&mut buf)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])?;
        downloaded += n as u64;
    }
    file.flush()?;

    Ok(downloaded)
}
