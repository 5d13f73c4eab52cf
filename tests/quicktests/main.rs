mod lazy;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// lazy trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Lazily remove the K from the tree
    Remove(K),
    /// Unlink the K's node from the tree
    RemoveHard(K),
    /// Unlink every tombstoned node
    CollectGarbage,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::RemoveHard(K::arbitrary(g)),
            3 => Op::CollectGarbage,
            _ => unreachable!(),
        }
    }
}
