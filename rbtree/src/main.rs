use std::env;
use std::error::Error;
use std::str::FromStr;

use log::{info, LevelFilter};
use rbtree::{Direction, RedBlackTree};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn Error>> {
    let level = match env::var("RBTREE_LOG") {
        Ok(level) => LevelFilter::from_str(&level)?,
        Err(_) => LevelFilter::Info,
    };
    CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])?;

    let mut tree = RedBlackTree::new();
    for v in [5, 4, 2, 3, 6, 1, 8, 7, 10, 18, 17] {
        tree.insert(v);
    }
    for v in [5, 7, 2] {
        tree.remove(&v);
    }
    info!("{} values, black height {}", tree.len(), tree.validate()?);

    let mut cursor = tree.cursor(Direction::Descending);
    let mut line = Vec::with_capacity(tree.len());
    while cursor.has_next() {
        line.push(cursor.next(&tree)?.to_string());
    }
    println!("{}", line.join(" "));
    println!("{tree}");
    Ok(())
}
