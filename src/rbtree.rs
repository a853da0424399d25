use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    iter::FusedIterator,
    mem,
    ops::{Bound, RangeBounds},
};

use log::{debug, trace};
use rand::Rng;

use crate::depth::Depth;
use crate::error::Error;

/// OrderedMap manage a single instance of in-memory index using
/// [red-black][rbtree] tree.
///
/// Nodes live in an arena and refer to each other by index, so the
/// parent link of every node is a plain back-reference that never owns
/// anything. Removed slots are recycled by later inserts.
///
/// [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    name: String,
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    n_count: usize, // number of entries in the tree.
}

/// Different ways to construct a new OrderedMap instance.
impl<K, V> OrderedMap<K, V> {
    /// Create an empty instance of OrderedMap, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> OrderedMap<K, V>
    where
        S: AsRef<str>,
    {
        OrderedMap::with_capacity(name, 0)
    }

    /// Create an empty instance with room for `capacity` entries before
    /// the node arena has to grow.
    pub fn with_capacity<S>(name: S, capacity: usize) -> OrderedMap<K, V>
    where
        S: AsRef<str>,
    {
        OrderedMap {
            name: name.as_ref().to_string(),
            nodes: Vec::with_capacity(capacity),
            free: Default::default(),
            root: Default::default(),
            n_count: Default::default(),
        }
    }

    /// Create a new instance of OrderedMap and load it with entries
    /// from `iter`. Note that iterator should return (key, value) tuples,
    /// where key must be ``unique``.
    pub fn load_from<S, I>(name: S, iter: I) -> Result<OrderedMap<K, V>, Error<K>>
    where
        K: Ord,
        S: AsRef<str>,
        I: Iterator<Item = (K, V)>,
    {
        let mut map = OrderedMap::with_capacity(name, iter.size_hint().0);
        for (key, value) in iter {
            map.create(key, value)?;
        }
        debug!("{}: loaded {} entries", map.name, map.n_count);
        Ok(map)
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        OrderedMap::new("")
    }
}

/// Maintenance API.
impl<K, V> OrderedMap<K, V> {
    /// Identify this instance. Applications can choose unique names while
    /// creating OrderedMap instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Color of the root node, None for an empty tree.
    pub fn root_color(&self) -> Option<Color> {
        self.root.map(|root| self.node(root).color)
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Option<Node<K, V>>>())
    }

    /// Remove all entries. Every node is released at once along with the
    /// arena, the instance can be re-used afterwards.
    pub fn clear(&mut self) {
        debug!("{}: clear {} entries", self.name, self.n_count);
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.n_count = 0;
    }
}

/// Write operations on OrderedMap instance.
impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Create a new {key, value} entry in the index. If key is already
    /// present return error and leave the index untouched.
    pub fn create(&mut self, key: K, value: V) -> Result<(), Error<K>> {
        match self.find(&key) {
            Ok(_) => Err(Error::OverwriteKey),
            Err(at) => {
                self.attach(at, key, value);
                Ok(())
            }
        }
    }

    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    /// Overwriting never restructures the tree.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.find(&key) {
            Ok(id) => Some(mem::replace(&mut self.node_mut(id).value, value)),
            Err(at) => {
                self.attach(at, key, value);
                None
            }
        }
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, then delete is effectively a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key).ok()?;
        let node = self.unlink(id);
        self.n_count -= 1;
        Some(node.value)
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root node is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    /// * Every child links back to its parent.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>>
    where
        K: Clone,
    {
        self.do_validate().map_err(|err| {
            debug!("{}: validation failed", self.name);
            err
        })
    }
}

/// Read operations on OrderedMap instance.
impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).ok().map(|id| &self.node(id).value)
    }

    /// Get a mutable reference to the value for key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key).ok()?;
        Some(&mut self.node_mut(id).value)
    }

    /// Check whether key is present in the index.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_ok()
    }

    /// Return the entry with the smallest key.
    pub fn min(&self) -> Result<(&K, &V), Error<K>> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        Ok(self.node(self.extreme(root, Side::Left)).entry())
    }

    /// Return the entry with the largest key.
    pub fn max(&self) -> Result<(&K, &V), Error<K>> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        Ok(self.node(self.extreme(root, Side::Right)).entry())
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(&K, &V)> {
        let mut id = self.root?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => self.child(id, Side::Left),
                _ => self.child(id, Side::Right),
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    id = next;
                }
                _ => break Some(self.node(id).entry()),
            }
        }
    }

    /// Return an iterator over all entries in this instance, in key
    /// order. Call `rev()` on it to walk in descending order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            cursor: self.cursor(),
        }
    }

    /// Range over all entries from low to high.
    pub fn range<Q, R>(&self, range: R) -> Iter<'_, K, V>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        let front = self.bound(range.start_bound(), Side::Left);
        let back = self.bound(range.end_bound(), Side::Right);
        let cursor = match (front, back) {
            (Some(f), Some(b)) if self.node(f).key <= self.node(b).key => Cursor {
                front,
                back,
            },
            _ => Cursor::empty(),
        };
        Iter { map: self, cursor }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    // Ok(node) holding key, else Err(slot) where a node for key would
    // attach, None if tree is empty.
    fn find<Q>(&self, key: &Q) -> Result<NodeId, Option<(NodeId, Side)>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut at = None;
        let mut node = self.root;
        while let Some(id) = node {
            let nkey: &Q = self.node(id).key.borrow();
            let side = match key.cmp(nkey) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Ok(id),
            };
            at = Some((id, side));
            node = self.child(id, side);
        }
        Err(at)
    }

    // Innermost node inside the bound. For Side::Left that is the smallest
    // key not below start bound, for Side::Right the largest key not above
    // end bound.
    fn bound<Q>(&self, bound: Bound<&Q>, side: Side) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut node = self.root;
        while let Some(id) = node {
            let nkey: &Q = self.node(id).key.borrow();
            let inside = match (bound, side) {
                (Bound::Unbounded, _) => true,
                (Bound::Included(q), Side::Left) => nkey >= q,
                (Bound::Excluded(q), Side::Left) => nkey > q,
                (Bound::Included(q), Side::Right) => nkey <= q,
                (Bound::Excluded(q), Side::Right) => nkey < q,
            };
            node = if inside {
                candidate = Some(id);
                self.child(id, side)
            } else {
                self.child(id, side.flip())
            };
        }
        candidate
    }

    fn attach(&mut self, at: Option<(NodeId, Side)>, key: K, value: V) {
        let parent = at.map(|(parent, _)| parent);
        let id = self.alloc(Node::new(key, value, parent));
        match at {
            None => self.root = Some(id),
            Some((parent, side)) => self.set_child(parent, side, Some(id)),
        }
        self.n_count += 1;
        self.insert_fixup(id);
    }

    fn do_validate(&self) -> Result<Stats, Error<K>>
    where
        K: Clone,
    {
        if self.is_red(self.root) {
            return Err(Error::RedRoot);
        }
        if let Some(parent) = self.root.and_then(|root| self.parent(root)) {
            let err = format!("root has parent {}", parent.0);
            return Err(Error::DanglingParent(err));
        }

        let mut stats = Stats::new(self.n_count, mem::size_of::<Option<Node<K, V>>>());
        stats.set_depths(Depth::new());
        let blacks = self.validate_tree(self.root, false, 0, 0, &mut stats)?;
        stats.set_blacks(blacks);

        let mut count = 0;
        let mut iter = self.iter();
        let mut prev = iter.next();
        count += prev.is_some() as usize;
        for entry in iter {
            if let Some((pkey, _)) = prev {
                if pkey >= entry.0 {
                    return Err(Error::SortError(pkey.clone(), entry.0.clone()));
                }
            }
            prev = Some(entry);
            count += 1;
        }
        if count != self.n_count {
            return Err(Error::CountMismatch(count, self.n_count));
        }
        Ok(stats)
    }

    fn validate_tree(
        &self,
        node: Option<NodeId>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize, Error<K>> {
        let id = match node {
            None => {
                if depth > 0 {
                    stats.sample_depth(depth);
                }
                return Ok(nb);
            }
            Some(id) => id,
        };

        let red = self.is_red(node);
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if !red {
            nb += 1;
        }
        for side in [Side::Left, Side::Right].iter() {
            if let Some(child) = self.child(id, *side) {
                if self.parent(child) != Some(id) {
                    let err = format!("node {} under {} links to {:?}", child.0, id.0, self.parent(child));
                    return Err(Error::DanglingParent(err));
                }
            }
        }
        let (left, right) = (self.child(id, Side::Left), self.child(id, Side::Right));
        let lblacks = self.validate_tree(left, red, nb, depth + 1, stats)?;
        let rblacks = self.validate_tree(right, red, nb, depth + 1, stats)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }
}

// Structural edits, rotations and fixups. Every routine here handles both
// mirror images through a `Side` argument.
impl<K, V> OrderedMap<K, V> {
    //  rotate(node, Side::Left), that is a left-rotate:
    //
    //              (i)                       (i)
    //               |                         |
    //              node                       y
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left      y              node      yr
    //                   / \             /  \
    //                 yl   yr       left   yl
    //
    // rotate(node, Side::Right) is the exact mirror.
    fn rotate(&mut self, node: NodeId, side: Side) {
        trace!("{}: rotate {:?} at {:?}", self.name, side, node);

        let other = side.flip();
        let y = self.expect_child(node, other);
        let inner = self.child(y, side);
        self.set_child(node, other, inner);
        self.set_parent(inner, Some(node));

        let parent = self.parent(node);
        self.set_parent(Some(y), parent);
        self.replace_child(parent, node, Some(y));

        self.set_child(y, side, Some(node));
        self.set_parent(Some(node), Some(y));
    }

    // Replace `old` with `new` under `parent`, or at root.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) if self.child(parent, Side::Left) == Some(old) => {
                self.set_child(parent, Side::Left, new)
            }
            Some(parent) => self.set_child(parent, Side::Right, new),
        }
    }

    fn transplant(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.parent(old);
        self.replace_child(parent, old, new);
        self.set_parent(new, parent);
    }

    fn insert_fixup(&mut self, mut node: NodeId) {
        // a red parent is never the root, hence grandparent exists.
        while let Some(parent) = self.parent(node).filter(|p| self.is_red(Some(*p))) {
            let grand = self.expect_parent(parent);
            let side = self.side_of(grand, parent);
            let uncle = self.child(grand, side.flip());

            match uncle.filter(|u| self.is_red(Some(*u))) {
                Some(uncle) => {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grand, Color::Red);
                    node = grand;
                }
                None => {
                    // straighten the zig-zag, then rotate the grandparent.
                    let parent = if self.child(parent, side.flip()) == Some(node) {
                        self.rotate(parent, side);
                        node
                    } else {
                        parent
                    };
                    self.set_color(parent, Color::Black);
                    self.set_color(grand, Color::Red);
                    self.rotate(grand, side.flip());
                    break;
                }
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // Splice `node` out of the tree, node's slot is released back to the
    // arena. When `node` has two children its in-order successor takes
    // over node's position and color.
    fn unlink(&mut self, node: NodeId) -> Node<K, V> {
        let left = self.child(node, Side::Left);
        let right = self.child(node, Side::Right);

        // (replacement, replacement's parent, color removed from the tree)
        let (x, x_parent, removed) = match (left, right) {
            (None, child) | (child, None) => {
                let parent = self.parent(node);
                self.transplant(node, child);
                (child, parent, self.node(node).color)
            }
            (Some(left), Some(right)) => {
                let succ = self.extreme(right, Side::Left);
                let removed = self.node(succ).color;
                let x = self.child(succ, Side::Right);
                let x_parent = if succ == right {
                    succ
                } else {
                    let parent = self.expect_parent(succ);
                    self.transplant(succ, x);
                    self.set_child(succ, Side::Right, Some(right));
                    self.set_parent(Some(right), Some(succ));
                    parent
                };
                self.transplant(node, Some(succ));
                self.set_child(succ, Side::Left, Some(left));
                self.set_parent(Some(left), Some(succ));
                let color = self.node(node).color;
                self.set_color(succ, color);
                (x, Some(x_parent), removed)
            }
        };

        if removed == Color::Black {
            self.delete_fixup(x, x_parent);
        }
        self.release(node)
    }

    // `node` is short of one black, it may be a nil leaf hence its
    // `parent` is passed along.
    fn delete_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.root && self.is_black(node) {
            let p = match parent {
                Some(p) => p,
                None => panic!("delete_fixup(): orphan non-root, call the programmer"),
            };
            let side = match self.child(p, Side::Left) == node {
                true => Side::Left,
                false => Side::Right,
            };
            let other = side.flip();

            let mut sibling = self.expect_child(p, other);
            if self.is_red(Some(sibling)) {
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.expect_child(p, other);
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, other);
            if self.is_black(near) && self.is_black(far) {
                self.set_color(sibling, Color::Red);
                node = Some(p);
                parent = self.parent(p);
                continue;
            }

            if self.is_black(far) {
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, other);
                sibling = self.expect_child(p, other);
            }

            let color = self.node(p).color;
            self.set_color(sibling, color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.child(sibling, other) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            trace!("{}: delete fixup done at {:?}", self.name, p);
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }
}

// Arena and link accessors.
impl<K, V> OrderedMap<K, V> {
    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<K, V> {
        match self.nodes.get_mut(id.0).and_then(Option::take) {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => panic!("release(): free on a free slot {:?}, call the programmer", id),
        }
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, V> {
        match self.nodes.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("node(): dangling {:?}, call the programmer", id),
        }
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("node_mut(): dangling {:?}, call the programmer", id),
        }
    }

    #[inline]
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    fn expect_parent(&self, id: NodeId) -> NodeId {
        match self.parent(id) {
            Some(parent) => parent,
            None => panic!("expect_parent(): {:?} is root, call the programmer", id),
        }
    }

    #[inline]
    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.node(id);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    fn expect_child(&self, id: NodeId, side: Side) -> NodeId {
        match self.child(id, side) {
            Some(child) => child,
            None => panic!("expect_child(): {:?} has no {:?} child, call the programmer", id, side),
        }
    }

    #[inline]
    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    // nil leaves carry no parent link.
    #[inline]
    fn set_parent(&mut self, id: Option<NodeId>, parent: Option<NodeId>) {
        if let Some(id) = id {
            self.node_mut(id).parent = parent;
        }
    }

    // which side of `parent` is `child` hanging from.
    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        match self.child(parent, Side::Left) == Some(child) {
            true => Side::Left,
            false => Side::Right,
        }
    }

    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.map_or(false, |id| self.node(id).color == Color::Red)
    }

    #[inline]
    fn is_black(&self, id: Option<NodeId>) -> bool {
        !self.is_red(id)
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color
    }

    // walk down towards `side` till the last node.
    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.child(id, side) {
            id = child;
        }
        id
    }

    // spans the whole tree.
    fn cursor(&self) -> Cursor {
        match self.root {
            Some(root) => Cursor {
                front: Some(self.extreme(root, Side::Left)),
                back: Some(self.extreme(root, Side::Right)),
            },
            None => Cursor::empty(),
        }
    }

    // in-order neighbour of `id`, successor for Side::Right and
    // predecessor for Side::Left.
    fn step(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self.child(id, side) {
            return Some(self.extreme(child, side.flip()));
        }
        let mut id = id;
        while let Some(parent) = self.parent(id) {
            if self.child(parent, side.flip()) == Some(id) {
                return Some(parent);
            }
            id = parent;
        }
        None
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut cursor = self.cursor();
        let mut nodes = vec![];
        while let Some(id) = cursor.next(self) {
            nodes.push(self.node(id));
        }
        write!(f, "OrderedMap<{:?}> ", self.name)?;
        f.debug_list().entries(nodes).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: Ord,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Index of a node slot in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Color of a node, absent children count as black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Node corresponds to a single entry in OrderedMap instance.
#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: Option<NodeId>, // back-reference, never owns.
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    // freshly inserted nodes are always red.
    fn new(key: K, value: V, parent: Option<NodeId>) -> Node<K, V> {
        Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{key: {:?}, value: {:?}, color: {:?}}}",
            self.key, self.value, self.color
        )
    }
}

// Pair of inclusive ends, walking towards each other. Exhausted once
// both ends meet.
#[derive(Clone)]
struct Cursor {
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl Cursor {
    fn empty() -> Cursor {
        Cursor {
            front: None,
            back: None,
        }
    }

    fn next<K, V>(&mut self, map: &OrderedMap<K, V>) -> Option<NodeId> {
        let id = self.front?;
        if self.front == self.back {
            *self = Cursor::empty();
        } else {
            self.front = map.step(id, Side::Right);
        }
        Some(id)
    }

    fn next_back<K, V>(&mut self, map: &OrderedMap<K, V>) -> Option<NodeId> {
        let id = self.back?;
        if self.front == self.back {
            *self = Cursor::empty();
        } else {
            self.back = map.step(id, Side::Left);
        }
        Some(id)
    }
}

/// Lazy in-order walk over [`OrderedMap`] entries, refer to
/// [`OrderedMap::iter`] and [`OrderedMap::range`].
pub struct Iter<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    cursor: Cursor,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            map: self.map,
            cursor: self.cursor.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.cursor.next(map).map(|id| map.node(id).entry())
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.cursor.next_back(map).map(|id| map.node(id).entry())
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Statistics on [`OrderedMap`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`OrderedMap::stats`] method.
/// * To get full statisics via [`OrderedMap::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    #[inline]
    fn sample_depth(&mut self, depth: usize) {
        if let Some(depths) = self.depths.as_mut() {
            depths.sample(depth)
        }
    }

    /// Return number entries in [`OrderedMap`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return size of an arena slot, including over-head for
    /// `OrderedMap<K,V>`. Although the node overhead is constant, the
    /// node size varies based on key and value types.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to any nil leaf.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics, None for an empty tree or when
    /// computed via [`OrderedMap::stats`].
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
