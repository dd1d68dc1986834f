use std::{env, path::Path};

mod app;
mod browser;
mod config;
mod meta;
mod runtime;
mod tags;
mod ui;

use tags::{LoftyBackend, TagBackend};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One path argument: print the raw metadata record and exit. No
    // arguments: start the interactive session.
    if let Some(arg) = env::args().nth(1) {
        return print_record(Path::new(&arg));
    }

    runtime::run()
}

fn print_record(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record = LoftyBackend.read(path)?;

    println!("Title:        {}", record.title);
    println!("Artist:       {}", record.artist);
    println!("Album Artist: {}", record.album_artist);
    println!("Album:        {}", record.album);
    println!("Genre:        {}", record.genre);
    println!("Comment:      {}", record.comment);
    println!("Codec:        {}", record.codec);
    println!("Tag Type:     {}", record.tag_type);
    println!("Release Date: {}", record.release_date);
    println!("Year:         {}", record.year);
    println!("Disc:         {}/{}", record.disc_number, record.disc_total);
    println!("Track:        {}/{}", record.track_number, record.track_total);
    println!("Bitrate:      {} kbps", record.bitrate);
    println!("Sample Rate:  {} Hz", record.sample_rate);
    println!("Duration:     {} s", record.duration_secs);
    println!("Channels:     {}", record.channels);
    println!("Has Image:    {}", record.has_image);

    Ok(())
}
