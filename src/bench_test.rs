use std::{cell::RefCell, rc::Rc, time::Duration};

use rand::{rngs::SmallRng, SeedableRng};

use crate::bench::{run, run_all, Operation, Run};
use crate::chain::ChainTable;
use crate::dataset::{Arrangement, Orderings};
use crate::table::Table;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Insert(String),
    Contains(String, bool),
    Remove(String, bool),
}

// Stub table, a plain vector recording every call made on it.
struct StubTable<'a> {
    items: Vec<&'a str>,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl<'a> StubTable<'a> {
    fn new(calls: Rc<RefCell<Vec<Call>>>) -> StubTable<'a> {
        StubTable {
            items: vec![],
            calls,
        }
    }
}

impl<'a> Table<&'a str> for StubTable<'a> {
    fn insert(&mut self, value: &'a str) {
        self.calls.borrow_mut().push(Call::Insert(value.to_string()));
        self.items.push(value);
    }

    fn contains(&self, value: &&'a str) -> bool {
        let found = self.items.contains(value);
        let call = Call::Contains(value.to_string(), found);
        self.calls.borrow_mut().push(call);
        found
    }

    fn remove(&mut self, value: &&'a str) -> bool {
        let pos = self.items.iter().position(|item| item == value);
        if let Some(pos) = pos {
            self.items.remove(pos);
        }
        let call = Call::Remove(value.to_string(), pos.is_some());
        self.calls.borrow_mut().push(call);
        pos.is_some()
    }
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_run_phases() {
    let data = names(&["alice", "Bob", "Carol"]);
    let calls = Rc::new(RefCell::new(vec![]));

    let r = run(Arrangement::Sorted, &data, StubTable::new(Rc::clone(&calls)));
    assert_eq!(r.arrangement(), Arrangement::Sorted);
    assert_eq!(r.hits(), 3);

    let mut expect = vec![];
    expect.extend(data.iter().map(|n| Call::Insert(n.clone())));
    expect.extend(data.iter().map(|n| Call::Contains(n.clone(), true)));
    expect.extend(data.iter().map(|n| Call::Remove(n.clone(), true)));
    assert_eq!(*calls.borrow(), expect);
}

// Hands the runner a table the test can still inspect afterwards.
struct Shared<'a>(Rc<RefCell<ChainTable<&'a str>>>);

impl<'a> Table<&'a str> for Shared<'a> {
    fn insert(&mut self, value: &'a str) {
        self.0.borrow_mut().insert(value)
    }

    fn contains(&self, value: &&'a str) -> bool {
        self.0.borrow().contains(value)
    }

    fn remove(&mut self, value: &&'a str) -> bool {
        self.0.borrow_mut().remove(value).is_some()
    }
}

#[test]
fn test_run_chain_table() {
    let data: Vec<String> = (0..5000).map(|i| format!("name-{}", i % 4000)).collect();
    let table = Rc::new(RefCell::new(ChainTable::new("shuffled")));

    let r = run(Arrangement::Shuffled, &data, Shared(Rc::clone(&table)));
    assert_eq!(r.hits(), data.len());
    assert!(table.borrow().is_empty());
    assert!(table.borrow().validate().is_ok());
}

#[test]
fn test_run_duplicates() {
    // every probe hits, every remove takes out one occurrence.
    let data = names(&["Bob", "bob", "Bob"]);
    let calls = Rc::new(RefCell::new(vec![]));
    let r = run(Arrangement::Reversed, &data, StubTable::new(Rc::clone(&calls)));
    assert_eq!(r.hits(), 3);

    let removed: Vec<Call> = calls.borrow()[6..].to_vec();
    assert_eq!(
        removed,
        vec![
            Call::Remove("Bob".to_string(), true),
            Call::Remove("bob".to_string(), true),
            Call::Remove("Bob".to_string(), true),
        ]
    );
}

#[test]
fn test_run_empty() {
    let data: Vec<String> = vec![];
    let calls = Rc::new(RefCell::new(vec![]));
    let r = run(Arrangement::Sorted, &data, StubTable::new(Rc::clone(&calls)));
    assert_eq!(r.hits(), 0);
    assert!(calls.borrow().is_empty());
    for op in Operation::ALL.iter() {
        assert!(r.elapsed(*op) < Duration::from_secs(1));
    }
}

#[test]
fn test_run_all_fresh_tables() {
    let data = names(&["Bob", "alice", "Carol", "alice"]);
    let mut rng = SmallRng::seed_from_u64(42);
    let orderings = Orderings::derive(&data, &mut rng);

    let mut made = vec![];
    let mut logs = vec![];
    let runs = run_all(&orderings, |arrangement| {
        made.push(arrangement);
        let calls = Rc::new(RefCell::new(vec![]));
        logs.push(Rc::clone(&calls));
        StubTable::new(calls)
    });

    assert_eq!(made, Arrangement::ALL.to_vec());
    let got: Vec<Arrangement> = runs.iter().map(|r| r.arrangement()).collect();
    assert_eq!(got, Arrangement::ALL.to_vec());

    // each table saw exactly its own arrangement, from empty to empty.
    for (arrangement, calls) in Arrangement::ALL.iter().zip(logs.iter()) {
        let inserted: Vec<String> = calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Insert(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(inserted, orderings.get(*arrangement));
        assert!(calls
            .borrow()
            .iter()
            .all(|call| !matches!(call, Call::Contains(_, false) | Call::Remove(_, false))));
    }
    assert!(runs.iter().all(|r| r.hits() == 4));
}

#[test]
fn test_samples() {
    let ms = Duration::from_millis;
    let r = Run::new(Arrangement::Shuffled, ms(1), ms(2), ms(3));
    let samples = r.samples();

    let ops: Vec<Operation> = samples.iter().map(|s| s.op).collect();
    assert_eq!(ops, Operation::ALL.to_vec());
    assert!(samples.iter().all(|s| s.arrangement == Arrangement::Shuffled));
    let secs: Vec<f64> = samples.iter().map(|s| s.secs()).collect();
    assert_eq!(secs, vec![0.001, 0.002, 0.003]);
    assert_eq!(r.elapsed(Operation::Delete), ms(3));
}
