// Decoded IPS patch and the applicator.
//
// Application is copy-on-write: the target slice is copied into a fresh,
// zero-initialised buffer sized to cover every cluster, then clusters are
// written in file order. Overlaps resolve last-write-wins by file order.

use super::cluster::Cluster;

/// Ordered list of clusters, in the order they appear in the patch file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    clusters: Vec<Cluster>,
}

impl Patch {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// One past the furthest byte any cluster writes; 0 for an empty patch.
    pub fn highest_patched_offset(&self) -> usize {
        self.clusters.iter().map(Cluster::end).max().unwrap_or(0)
    }

    /// Length of the buffer produced by applying this patch to a target of
    /// `target_len` bytes.
    pub fn output_len(&self, target_len: usize) -> usize {
        target_len.max(self.highest_patched_offset())
    }

    /// Apply the patch to `target`, returning a new buffer.
    pub fn apply(&self, target: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.output_len(target.len()));
        out.extend_from_slice(target);
        self.apply_into(&mut out);
        out
    }

    /// Apply the patch in place, zero-extending `buf` when a cluster reaches
    /// past its end.
    pub fn apply_into(&self, buf: &mut Vec<u8>) {
        let len = self.output_len(buf.len());
        buf.resize(len, 0);
        for cluster in &self.clusters {
            cluster.apply_to(buf);
        }
    }
}

impl From<Vec<Cluster>> for Patch {
    fn from(clusters: Vec<Cluster>) -> Self {
        Self::new(clusters)
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

impl IntoIterator for Patch {
    type Item = Cluster;
    type IntoIter = std::vec::IntoIter<Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.into_iter()
    }
}

impl FromIterator<Cluster> for Patch {
    fn from_iter<I: IntoIterator<Item = Cluster>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
