pub mod core;
pub mod storage;
pub mod index;
pub mod materialize;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          ISAMDEX STRUCT ARCHITECTURE                          │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── CORE LAYER ──────────────────────────────────┐
│                                                                              │
│  struct IndexedStore                                                         │
│    config: Config              // capacity + dump layout                     │
│    store:  RecordStore         // append-only record file                    │
│    index:  IndexTree           // key -> Position                            │
│                                                                              │
│  struct Record { key, name, birth_date, category, deleted }                  │
│  struct Position(usize)        // fixed at append time                       │
│  struct StoreStats             // counters, orphaned records                 │
│                                                                              │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── INDEX LAYER ─────────────────────────────────┐
│                                                                              │
│  struct IndexTree { root: Option<Box<Node>>, len }                           │
│  struct Node      { entry: IndexEntry, left, right }                         │
│  struct IndexEntry { key, position: Option<Position> }   // ordered by key  │
│  struct Traversal  // pre / in / post / level order, no recursion           │
│                                                                              │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── RELATIONSHIPS ────────────────────────────────┐
│                                                                              │
│  IndexedStore ──owns──> RecordStore ──holds──> Record                        │
│       │                                                                      │
│       ├──owns──> IndexTree ──owns──> Node ──holds──> IndexEntry              │
│       │                                   └──points at──> Position           │
│       │                                                                      │
│       └──calls──> rebuild_ordered(IndexTree, RecordStore) ──> RecordStore    │
│                   build_index(RecordStore) ──> IndexTree                     │
│                                                                              │
└──────────────────────────────────────────────────────────────────────────────┘
*/
