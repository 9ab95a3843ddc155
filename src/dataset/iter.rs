use super::Dataset;
use ndarray::ArrayView1;

/// Iterator over the examples of a dataset
///
/// Yields each example as a view on its values together with its class, `None` if the class is
/// missing or no class attribute was designated.
pub struct Iter<'a> {
    dataset: &'a Dataset,
    idx: usize,
}

impl<'a> Iter<'a> {
    pub fn new(dataset: &'a Dataset) -> Iter<'a> {
        Iter { dataset, idx: 0 }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ArrayView1<'a, f64>, Option<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.dataset.nsamples() {
            return None;
        }

        let item = (
            self.dataset.example(self.idx),
            self.dataset.class_of(self.idx),
        );
        self.idx += 1;

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.nsamples() - self.idx;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}
