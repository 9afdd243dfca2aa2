use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rbtree::RedBlackTree;

/// Counts every comparison made through any clone of the shared counter.
struct Cmps<T> {
    inner: T,
    cmps: Rc<AtomicU64>,
}

impl<T> Cmps<T> {
    fn cmps(&self) -> u64 {
        self.cmps.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.cmps.store(0, Ordering::SeqCst);
    }
}

impl<T> PartialEq for Cmps<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmps.fetch_add(1, Ordering::SeqCst);
        self.inner == other.inner
    }
}

impl<T> PartialOrd for Cmps<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Eq for Cmps<T> where T: Eq {}
impl<T> Ord for Cmps<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmps.fetch_add(1, Ordering::SeqCst);
        self.inner.cmp(&other.inner)
    }
}

fn gen_random(count: usize, key_max: i32) -> Vec<Cmps<i32>> {
    let counter = Rc::new(AtomicU64::new(0));
    let mut vec = Vec::with_capacity(count);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..count {
        let val = rng.gen_range(0..key_max);
        vec.push(Cmps {
            inner: val,
            cmps: Rc::clone(&counter),
        })
    }
    assert_eq!(vec.len(), count);
    vec
}

#[test]
#[ignore = "not a test, prints metrics"]
fn print_metrics() {
    for count in [100, 1000, 10000] {
        let data = gen_random(count, i32::MAX);
        let counter = Rc::clone(&data[0].cmps);
        let probe = Cmps {
            inner: data[count / 2].inner,
            cmps: Rc::clone(&counter),
        };

        probe.reset();
        let tree: RedBlackTree<_> = data.into_iter().collect();
        println!("red_black_tree_insert_{count} = {}", probe.cmps());
        probe.reset();
        assert!(tree.contains(&probe));
        println!("red_black_tree_contains_{count} = {}", probe.cmps());

        let data = gen_random(count, i32::MAX);
        let probe = Cmps {
            inner: probe.inner,
            cmps: Rc::clone(&data[0].cmps),
        };
        probe.reset();
        let set: BTreeSet<_> = data.into_iter().collect();
        println!("btree_set_insert_{count} = {}", probe.cmps());
        probe.reset();
        assert!(set.contains(&probe));
        println!("btree_set_contains_{count} = {}", probe.cmps());
    }
}
