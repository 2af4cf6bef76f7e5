use common::Result;

/// Lazily groups an iterator into consecutive `Vec`s of `size` items. The
/// last group holds the remainder.
pub struct Chunks<I: Iterator> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Chunks<I> {
    pub fn new(inner: I, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(common::Error::InvalidInput(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { inner, size })
    }
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.inner.by_ref().take(self.size).collect();
        if chunk.is_empty() { None } else { Some(chunk) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        (
            lower.div_ceil(self.size),
            upper.map(|upper| upper.div_ceil(self.size)),
        )
    }
}

pub fn break_into_chunks<I>(items: I, size: usize) -> Result<Chunks<I::IntoIter>>
where
    I: IntoIterator,
{
    Chunks::new(items.into_iter(), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_count_and_sizes() {
        let items: Vec<usize> = (0..1440).collect();
        let chunks: Vec<Vec<usize>> = break_into_chunks(items.clone(), 100).unwrap().collect();

        assert_eq!(chunks.len(), 15);
        assert!(chunks[..14].iter().all(|chunk| chunk.len() == 100));
        assert_eq!(chunks[14].len(), 40);
        assert_eq!(chunks.concat(), items);
    }

    #[test]
    fn test_exact_multiple() {
        let chunks: Vec<Vec<u32>> = break_into_chunks(0..300u32, 100).unwrap().collect();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|chunk| chunk.len() == 100));
    }

    #[test]
    fn test_shorter_than_chunk() {
        let chunks: Vec<Vec<&str>> = break_into_chunks(vec!["a", "b", "c"], 100)
            .unwrap()
            .collect();
        assert_eq!(chunks, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_empty_input() {
        let mut chunks = break_into_chunks(Vec::<u8>::new(), 100).unwrap();
        assert_eq!(chunks.size_hint(), (0, Some(0)));
        assert!(chunks.next().is_none());
    }

    #[test]
    fn test_zero_size_rejected() {
        let result = break_into_chunks(vec![1, 2, 3], 0);
        assert!(matches!(result, Err(common::Error::InvalidInput(_))));
    }

    #[test]
    fn test_size_hint() {
        let chunks = break_into_chunks(0..250, 100).unwrap();
        assert_eq!(chunks.size_hint(), (3, Some(3)));
    }
}
