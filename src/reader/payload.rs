use crate::encoder::tables::SymbolSpec;
use crate::error::ReadError;
use crate::models::{Mode, Version};
use crate::reader::modes::{alphanumeric::AlphanumericDecoder, byte::ByteDecoder, numeric::NumericDecoder};
use crate::reader::reed_solomon::ReedSolomonDecoder;

/// Pack MSB-first bits into codewords, dropping a trailing partial byte
pub(crate) fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | bit as u8))
        .collect()
}

/// Split interleaved codewords into blocks, correct each one and return the data codewords
pub(crate) fn deinterleave_and_correct(
    codewords: &[u8],
    spec: &SymbolSpec,
) -> Result<(Vec<u8>, usize), ReadError> {
    if codewords.len() < spec.total_codewords {
        return Err(ReadError::MalformedPayload("codeword stream too short"));
    }
    let ecc_per_block = spec.ec_codewords_per_block();
    let longest = spec
        .blocks
        .iter()
        .map(|b| b.data_codewords)
        .max()
        .unwrap_or(0);

    let mut blocks: Vec<Vec<u8>> = spec
        .blocks
        .iter()
        .map(|b| Vec::with_capacity(b.data_codewords + b.ec_codewords))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..longest {
        for (block, info) in blocks.iter_mut().zip(&spec.blocks) {
            if i < info.data_codewords {
                block.extend(stream.next());
            }
        }
    }
    for _ in 0..ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(stream.next());
        }
    }

    let rs = ReedSolomonDecoder::new(ecc_per_block);
    let mut data = Vec::with_capacity(spec.data_codewords);
    let mut corrected = 0;
    for (index, (block, info)) in blocks.iter_mut().zip(&spec.blocks).enumerate() {
        match rs.decode(block) {
            Ok(fixed) => corrected += fixed,
            Err(reason) => {
                tracing::debug!(block = index, reason, "block uncorrectable");
                return Err(ReadError::Uncorrectable { block: index });
            }
        }
        data.extend_from_slice(&block[..info.data_codewords]);
    }
    Ok((data, corrected))
}

/// Decode segments from data codewords until the terminator
pub(crate) fn decode_payload(
    data_codewords: &[u8],
    version: Version,
) -> Result<(Vec<u8>, Vec<Mode>), ReadError> {
    let bits: Vec<bool> = data_codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect();
    let mut reader = BitReader::new(&bits);
    let mut data = Vec::new();
    let mut modes = Vec::new();

    while reader.remaining() >= 4 {
        let indicator = reader.read_bits(4)?;
        if indicator == 0 {
            break;
        }
        let mode = Mode::from_indicator(indicator)
            .ok_or(ReadError::MalformedPayload("unsupported mode indicator"))?;
        let count = reader.read_bits(mode.char_count_bits(version))? as usize;
        match mode {
            Mode::Numeric => NumericDecoder::decode(&mut reader, count, &mut data)?,
            Mode::Alphanumeric => AlphanumericDecoder::decode(&mut reader, count, &mut data)?,
            Mode::Byte => ByteDecoder::decode(&mut reader, count, &mut data)?,
        }
        modes.push(mode);
    }

    if modes.is_empty() {
        return Err(ReadError::MalformedPayload("no segments"));
    }
    Ok((data, modes))
}

/// MSB-first reader over a bit slice
pub(crate) struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    pub(crate) fn read_bits(&mut self, n: usize) -> Result<u32, ReadError> {
        if n > self.remaining() {
            return Err(ReadError::MalformedPayload("segment runs past end of data"));
        }
        let value = self.bits[self.idx..self.idx + n]
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | bit as u32);
        self.idx += n;
        Ok(value)
    }
}
