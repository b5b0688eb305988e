use linked_bst::{Tree, TreeError};

use std::collections::HashSet;

fn tree_of(xs: &[i8]) -> Tree<i8> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x);
    }
    tree
}

fn sorted(xs: &[i8]) -> Vec<i8> {
    let mut xs = xs.to_vec();
    xs.sort_unstable();
    xs
}

quickcheck::quickcheck! {
    fn inorder_is_sorted(xs: Vec<i8>) -> bool {
        let tree = tree_of(&xs);

        tree.iter().copied().collect::<Vec<_>>() == sorted(&xs)
            && tree.iter().rev().copied().collect::<Vec<_>>()
                == sorted(&xs).into_iter().rev().collect::<Vec<_>>()
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree = tree_of(&xs);

        xs.iter().all(|x| tree.search(x).map(|n| *n.key()) == Ok(*x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = tree_of(&xs);
        let added: HashSet<_> = xs.iter().copied().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let expected = if xs.is_empty() { TreeError::Empty } else { TreeError::NotFound };

        nots.difference(&added).all(|x| tree.search(x).unwrap_err() == expected)
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = tree_of(&xs);
        let mut still_present = xs.clone();
        let mut deleted = 0;
        for delete in &deletes {
            if tree.delete(delete).is_ok() {
                deleted += 1;
                let pos = still_present.iter().position(|x| x == delete).unwrap();
                still_present.swap_remove(pos);
            }
        }

        tree.size() == xs.len() - deleted
            && tree.size() == still_present.len()
            && tree.iter().copied().collect::<Vec<_>>() == sorted(&still_present)
            && deletes.iter().all(|x| tree.search(x).is_ok() == still_present.contains(x))
    }
}

quickcheck::quickcheck! {
    fn delete_every_copy(xs: Vec<i8>) -> bool {
        let mut tree = tree_of(&xs);
        for x in &xs {
            if tree.delete(x).is_err() {
                return false;
            }
        }

        tree.is_empty() && tree.size() == 0 && tree.root().is_none()
    }
}

quickcheck::quickcheck! {
    fn min_and_max_bound_the_walk(xs: Vec<i8>) -> bool {
        let tree = tree_of(&xs);
        let walk: Vec<_> = tree.iter().copied().collect();

        match (tree.minimum(tree.root()), tree.maximum(tree.root())) {
            (Ok(min), Ok(max)) => walk.first() == Some(min.key()) && walk.last() == Some(max.key()),
            (Err(TreeError::InvalidArgument(_)), Err(TreeError::InvalidArgument(_))) => xs.is_empty(),
            _ => false,
        }
    }
}

quickcheck::quickcheck! {
    fn successor_by_key_visits_distinct_keys(xs: Vec<i8>) -> bool {
        // Stepping by key only works without duplicates: the successor of a
        // duplicated key is an equal key, which searches back to the same node.
        let mut seen = HashSet::new();
        let distinct: Vec<_> = xs.into_iter().filter(|x| seen.insert(*x)).collect();
        let tree = tree_of(&distinct);

        let mut walked = Vec::new();
        let mut current = tree.minimum(tree.root()).ok().map(|n| *n.key());
        while let Some(key) = current {
            walked.push(key);
            current = tree.inorder_successor(&key).unwrap().map(|n| *n.key());
        }
        walked == sorted(&distinct)
    }
}

quickcheck::quickcheck! {
    fn insert_then_delete_round_trips(x: i8) -> bool {
        let mut tree = Tree::new();
        tree.insert(x);

        tree.delete(&x) == Ok(x) && tree.size() == 0 && tree.root().is_none()
    }
}
