/*!
FPA posting lists. spec.md §4.E "FPA posting-list soundness" / "FPA chunk invariants", grounded
in `fpalist.c`.

A posting list is a sequence of fixed-size chunks, each holding entries right-justified and the
whole list kept in strictly decreasing [FpaId] order so two lists can be intersected or unioned in
one linear pass (spec.md §3: "posting lists are kept sorted by decreasing FPA_ID"). Chunks start
at [MIN_CHUNK] slots and double (capped at [MAX_CHUNK]) whenever the chunk count reaches the chunk
size, at which point the whole list is rebuilt into fewer, larger chunks — this is the "doubling"
rule from `fpalist.c` spelled out in spec.md §4.E.
*/

/// A unique, nonzero identifier assigned to every term inserted into an FPA index (spec.md §3:
/// "Every term in an FPA index has a nonzero FPA_ID").
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FpaId(pub std::num::NonZeroU64);

pub const MIN_CHUNK: usize = 4;
pub const MAX_CHUNK: usize = 512;

/// One posting-list entry: an [FpaId] and the opaque object it names (e.g. a clause id).
#[derive(Clone, Copy, Debug)]
pub struct Posting<T> {
    pub id: FpaId,
    pub object: T,
}

/// A chunked posting list, kept in decreasing-[FpaId] order across chunk boundaries.
#[derive(Clone, Debug)]
pub struct FpaList<T> {
    chunk_size: usize,
    /// Chunks in decreasing-id order; each chunk's entries are right-justified (i.e. stored
    /// densely at the end of a conceptually fixed-size slot, modeled here simply as a `Vec` since
    /// Rust's `Vec` already elides the unused prefix `fpalist.c`'s C arrays must zero out).
    chunks: Vec<Vec<Posting<T>>>,
}

impl<T: Clone> Default for FpaList<T> {
    fn default() -> Self {
        FpaList {
            chunk_size: MIN_CHUNK,
            chunks: Vec::new(),
        }
    }
}

impl<T: Clone> FpaList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.is_empty())
    }

    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum()
    }

    /// Insert keeping the whole list in decreasing-id order, growing the chunk list (and
    /// doubling the chunk size once the chunk count reaches it, per spec.md §4.E) as needed.
    pub fn insert(&mut self, id: FpaId, object: T) {
        if self.chunks.is_empty() {
            self.chunks.push(Vec::new());
        }

        // Find the chunk whose id-range should contain `id`: walk chunks front-to-back (largest
        // ids first) until one is found whose last (smallest) entry is still >= id, or we run out.
        let mut target = self.chunks.len() - 1;
        for (i, chunk) in self.chunks.iter().enumerate() {
            if chunk.last().map(|p| p.id <= id).unwrap_or(true) {
                target = i;
                break;
            }
        }

        let chunk = &mut self.chunks[target];
        let pos = chunk.iter().position(|p| p.id < id).unwrap_or(chunk.len());
        chunk.insert(pos, Posting { id, object });

        if chunk.len() > self.chunk_size {
            self.split_chunk(target);
        }

        if self.chunks.len() >= self.chunk_size && self.chunk_size < MAX_CHUNK {
            self.double_chunk_size();
        }
    }

    fn split_chunk(&mut self, index: usize) {
        let chunk = self.chunks.remove(index);
        let mid = chunk.len() / 2;
        let (front, back) = chunk.split_at(mid);
        self.chunks.insert(index, back.to_vec());
        self.chunks.insert(index, front.to_vec());
    }

    fn double_chunk_size(&mut self) {
        let flat: Vec<Posting<T>> = self.chunks.drain(..).flatten().collect();
        self.chunk_size = (self.chunk_size * 2).min(MAX_CHUNK);
        for group in flat.chunks(self.chunk_size) {
            self.chunks.push(group.to_vec());
        }
    }

    /// Remove the entry with the given id, consolidating adjacent half-full chunks (spec.md
    /// §4.E: "Adjacent half-full chunks consolidate on deletion").
    pub fn remove(&mut self, id: FpaId) {
        for i in 0..self.chunks.len() {
            if let Some(pos) = self.chunks[i].iter().position(|p| p.id == id) {
                self.chunks[i].remove(pos);
                self.consolidate_around(i);
                return;
            }
        }
    }

    fn consolidate_around(&mut self, i: usize) {
        let half = self.chunk_size / 2;
        if i + 1 < self.chunks.len() && self.chunks[i].len() < half && self.chunks[i + 1].len() < half {
            let next = self.chunks.remove(i + 1);
            self.chunks[i].extend(next);
        }
        if self.chunks[i].is_empty() && self.chunks.len() > 1 {
            self.chunks.remove(i);
        }
    }

    /// Iterate every posting in decreasing-id order (spec.md §9: "FPA answers stream in
    /// decreasing FPA_ID").
    pub fn iter(&self) -> impl Iterator<Item = &Posting<T>> {
        self.chunks.iter().flatten()
    }
}
