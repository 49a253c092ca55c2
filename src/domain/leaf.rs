use std::{
    borrow::Cow,
    convert::Infallible,
    io::{self, Read, Write},
};

/// Error produced while turning a leaf into bytes.
pub type LeafError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A value that can be written into the hasher as a single tree leaf.
pub trait Leaf {
    /// Write the complete leaf content into `out`.
    fn write_leaf<W: Write>(&mut self, out: &mut W) -> Result<(), LeafError>;
}

/// Explicit binary encoding of a value.
pub trait BinaryEncode {
    type Error: Into<LeafError>;

    fn encode(&self) -> Result<Cow<'_, [u8]>, Self::Error>;
}

impl<T: BinaryEncode + ?Sized> Leaf for &T {
    fn write_leaf<W: Write>(&mut self, out: &mut W) -> Result<(), LeafError> {
        let bytes = self.encode().map_err(Into::into)?;
        out.write_all(&bytes)?;
        Ok(())
    }
}

impl BinaryEncode for [u8] {
    type Error = Infallible;

    fn encode(&self) -> Result<Cow<'_, [u8]>, Self::Error> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> BinaryEncode for [u8; N] {
    type Error = Infallible;

    fn encode(&self) -> Result<Cow<'_, [u8]>, Self::Error> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl BinaryEncode for Vec<u8> {
    type Error = Infallible;

    fn encode(&self) -> Result<Cow<'_, [u8]>, Self::Error> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl BinaryEncode for str {
    type Error = Infallible;

    fn encode(&self) -> Result<Cow<'_, [u8]>, Self::Error> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl BinaryEncode for String {
    type Error = Infallible;

    fn encode(&self) -> Result<Cow<'_, [u8]>, Self::Error> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

/// A leaf whose content is streamed from a reader until EOF.
#[derive(Debug)]
pub struct ReadLeaf<R>(pub R);

impl<R: Read> Leaf for ReadLeaf<R> {
    fn write_leaf<W: Write>(&mut self, out: &mut W) -> Result<(), LeafError> {
        io::copy(&mut self.0, out)?;
        Ok(())
    }
}
