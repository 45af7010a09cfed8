/// Isamdex walkthrough
///
/// Seeds a small person registry and exercises the whole API:
/// - insert into store + index (including a rejected duplicate)
/// - lookup by key
/// - soft delete
/// - traversals
/// - key-ordered rebuild and stats
///
/// Run with `RUST_LOG=Isamdex=debug` to see index events.

use Isamdex::core::config::Config;
use Isamdex::core::database::IndexedStore;
use Isamdex::core::types::Record;
use Isamdex::index::traversal::TraversalOrder;
use Isamdex::storage::dump::{dump_entries, dump_store};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    println!("\n=== Isamdex registry demo ===\n");

    let config = Config::default();
    let layout = config.dump;
    let mut db = IndexedStore::open(config);

    // Step 1: INSERT
    println!("Step 1: inserting records...");
    let seed = [
        ("111.111.111-11", "Alice Silva", "01/01/1990", 'F'),
        ("333.333.333-33", "Carlos Mendes", "03/03/1992", 'M'),
        ("222.222.222-22", "Bob Oliveira", "02/02/1991", 'M'),
        ("555.555.555-55", "Eva Souza", "05/05/1994", 'F'),
        ("444.444.444-44", "Daniel Costa", "04/04/1993", 'M'),
        ("000.000.000-00", "Zeroberto Santos", "00/00/0000", 'O'),
        ("333.333.333-33", "Carlos Duplicado", "03/03/1992", 'M'),
    ];
    for (key, name, born, category) in seed {
        match db.insert(Record::new(key, name, born, category)) {
            Ok(position) => println!("  {} -> position {}", key, position),
            Err(e) => println!("  {} rejected: {}", key, e),
        }
    }

    print!("\n{}", dump_store(db.store(), &layout));
    println!("In order: {}\n", dump_entries(db.index().in_order()));

    // Step 2: LOOKUP
    println!("Step 2: lookup by key...");
    for key in ["222.222.222-22", "999.999.999-99"] {
        match db.find(key) {
            Some(record) => println!("  found: {}", record),
            None => println!("  {} not in index", key),
        }
    }

    // Step 3: DELETE
    println!("\nStep 3: deleting records...");
    for key in ["333.333.333-33", "111.111.111-11", "999.999.999-99"] {
        match db.delete(key) {
            Ok(position) => println!("  {} deleted (slot {})", key, position),
            Err(e) => println!("  {}: {}", key, e),
        }
    }

    print!("\n{}", dump_store(db.store(), &layout));
    for order in [
        TraversalOrder::PreOrder,
        TraversalOrder::InOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::LevelOrder,
    ] {
        println!("{:?}: {}", order, dump_entries(db.index().traverse(order)));
    }

    // Step 4: REBUILD
    println!("\nStep 4: key-ordered rebuild...");
    let ordered = db.rebuild_ordered();
    print!("{}", dump_store(&ordered, &layout));

    // Step 5: STATS
    println!("\nStep 5: stats");
    println!("{}", db.stats().to_json()?);

    Ok(())
}
