// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Strongly typed indices for nodes and tasks.
//!
//! Both index spaces are plain `usize` positions, which makes it easy to pass
//! a task position where a node position was expected. `TypedIndex<T>` wraps the
//! raw value with a phantom tag so the compiler keeps the two apart, at no
//! runtime cost.

/// Tags a `TypedIndex` with a human-readable name used for formatting.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index bound to the domain named by its tag `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps a raw position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the raw position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline]
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

/// A tag type for node indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIndexTag;

impl TypedIndexTag for NodeIndexTag {
    const NAME: &'static str = "NodeIndex";
}

/// A typed index for cloud nodes.
pub type NodeIndex = TypedIndex<NodeIndexTag>;

/// A tag type for task indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TaskIndexTag;

impl TypedIndexTag for TaskIndexTag {
    const NAME: &'static str = "TaskIndex";
}

/// A typed index for workload tasks.
pub type TaskIndex = TypedIndex<TaskIndexTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_get_and_conversions() {
        let node = NodeIndex::new(4);
        assert_eq!(node.get(), 4);

        let from_raw: TaskIndex = 9.into();
        let raw: usize = from_raw.into();
        assert_eq!(raw, 9);
    }

    #[test]
    fn test_display_uses_tag_name() {
        assert_eq!(format!("{}", NodeIndex::new(2)), "NodeIndex(2)");
        assert_eq!(format!("{:?}", TaskIndex::new(7)), "TaskIndex(7)");
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let mut nodes = vec![NodeIndex::new(3), NodeIndex::new(0), NodeIndex::new(1)];
        nodes.sort();
        assert_eq!(
            nodes,
            vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(3)]
        );
    }
}
