use audiogroup::process::read::Reader;

pub fn cmd_list<R>(reader: &Reader<R>) {
    let header = reader.header();

    println!();
    println!("Audiogroup Container");
    println!("====================");
    println!();
    println!("Declared file size          {} bytes", header.file_size);
    println!("Directory length            {} bytes", header.directory_len());
    println!("Tracks                      {}", reader.len());
    println!();

    if reader.is_empty() {
        return;
    }

    println!("  #     Offset      Size");
    for (index, track) in reader.tracks().iter().enumerate() {
        if track.is_unbounded() {
            println!("{:>3}  {:>9}  {:>8}", index, track.offset, "to end");
        } else {
            println!("{:>3}  {:>9}  {:>8}", index, track.offset, track.size);
        }
    }
    println!();
}
